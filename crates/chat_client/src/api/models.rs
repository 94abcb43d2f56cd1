use serde::{Deserialize, Serialize};

pub const USER_ROLE: &str = "user";

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChatRequest {
    pub conversation: Vec<ConversationTurn>,
}

impl ChatRequest {
    /// A request carrying only the message just submitted
    pub fn single_turn(text: impl Into<String>) -> Self {
        Self {
            conversation: vec![ConversationTurn::user(text)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: String,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: USER_ROLE.to_string(),
            text: text.into(),
        }
    }
}

/// Backend answer. `result` may be missing or null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ChatReply {
    #[serde(default)]
    pub result: Option<String>,
}

impl ChatReply {
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: Some(result.into()),
        }
    }

    /// The reply text, if there is any to show
    pub fn text(&self) -> Option<&str> {
        self.result.as_deref().filter(|text| !text.is_empty())
    }
}
