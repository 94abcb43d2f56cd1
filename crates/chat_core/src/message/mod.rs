//! Message module - chat messages and the transcript that holds them
//!
//! Every displayed message goes through here: user input and bot replies are
//! rendered as markdown, failure notices are kept as plain text.

mod content;
mod transcript;

use serde::{Deserialize, Serialize};

pub use content::{escape_text, MessageBody};
pub use transcript::{Transcript, TranscriptError};

/// Who a message is attributed to.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Class name used on the message container
    pub fn css_class(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A single entry in the transcript.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub body: MessageBody,
    /// Set on the bot placeholder until its request settles
    #[serde(default)]
    pub pending: bool,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self {
            sender: Sender::User,
            body: MessageBody::markdown(text),
            pending: false,
        }
    }

    pub fn bot(text: &str) -> Self {
        Self {
            sender: Sender::Bot,
            body: MessageBody::markdown(text),
            pending: false,
        }
    }

    /// Bot message shown while waiting for the backend
    pub fn placeholder(text: &str) -> Self {
        Self {
            pending: true,
            ..Self::bot(text)
        }
    }

    /// `<div class="message SENDER"><p>BODY</p></div>`
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"message {}\"><p>{}</p></div>",
            self.sender.css_class(),
            self.body.to_html()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_is_rendered() {
        let message = ChatMessage::user("hello *there*");
        assert_eq!(message.sender, Sender::User);
        assert!(!message.pending);
        assert_eq!(
            message.to_html(),
            "<div class=\"message user\"><p>hello <em>there</em></p></div>"
        );
    }

    #[test]
    fn test_placeholder_is_pending_bot() {
        let message = ChatMessage::placeholder("Thinking");
        assert_eq!(message.sender, Sender::Bot);
        assert!(message.pending);
        assert_eq!(
            message.to_html(),
            "<div class=\"message bot\"><p>Thinking</p></div>"
        );
    }

    #[test]
    fn test_sender_serialization() {
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }
}
