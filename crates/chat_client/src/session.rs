//! ChatSession - the submit flow behind the chat input
//!
//! Appends the user's message and a pending placeholder, asks the backend,
//! then settles the placeholder with the rendered reply or a plain-text
//! failure notice. Failures are shown once and never retried.

use std::sync::Arc;

use chat_core::{ChatMessage, Config, MessageBody, Transcript};
use log::{debug, error};

use crate::api::models::ChatRequest;
use crate::client_trait::ChatBackend;

/// What a call to [`ChatSession::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; the transcript is unchanged
    Ignored,
    /// The placeholder at `index` now holds the rendered reply
    Answered { index: usize },
    /// The backend answered without a result
    EmptyReply { index: usize },
    /// The request failed; `message` is what the user sees
    Failed { index: usize, message: String },
}

impl SubmitOutcome {
    /// Transcript index of the bot message, unless the input was ignored
    pub fn bot_index(&self) -> Option<usize> {
        match self {
            SubmitOutcome::Ignored => None,
            SubmitOutcome::Answered { index }
            | SubmitOutcome::EmptyReply { index }
            | SubmitOutcome::Failed { index, .. } => Some(*index),
        }
    }
}

pub struct ChatSession {
    backend: Arc<dyn ChatBackend>,
    transcript: Transcript,
    thinking_text: String,
    empty_reply_text: String,
    request_failed_text: String,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn ChatBackend>, config: &Config) -> Self {
        Self {
            backend,
            transcript: Transcript::new(),
            thinking_text: config.thinking_text.clone(),
            empty_reply_text: config.empty_reply_text.clone(),
            request_failed_text: config.request_failed_text.clone(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn into_transcript(self) -> Transcript {
        self.transcript
    }

    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }

        self.transcript.push(ChatMessage::user(text));
        let index = self
            .transcript
            .push(ChatMessage::placeholder(&self.thinking_text));

        debug!("Submitting chat message ({} bytes)", text.len());
        let (body, outcome) = match self.backend.send_chat(ChatRequest::single_turn(text)).await {
            Ok(reply) => match reply.text() {
                Some(result) => (MessageBody::markdown(result), SubmitOutcome::Answered { index }),
                None => (
                    MessageBody::text(self.empty_reply_text.as_str()),
                    SubmitOutcome::EmptyReply { index },
                ),
            },
            Err(err) => {
                error!("Chat Error: {err}");
                let mut message = err.to_string();
                if message.is_empty() {
                    message = self.request_failed_text.clone();
                }
                (
                    MessageBody::text(message.as_str()),
                    SubmitOutcome::Failed { index, message },
                )
            }
        };

        // `index` was pushed above as a pending placeholder.
        if let Err(err) = self.transcript.resolve(index, body) {
            error!("Failed to settle placeholder: {err}");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chat_core::Sender;

    use crate::api::models::ChatReply;
    use crate::error::{ChatClientError, Result};

    type Responder = Box<dyn Fn(&ChatRequest) -> Result<ChatReply> + Send + Sync>;

    // Fake backend answering from a closure
    struct FakeBackend {
        respond: Responder,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl FakeBackend {
        fn new(respond: impl Fn(&ChatRequest) -> Result<ChatReply> + Send + Sync + 'static) -> Arc<Self> {
            Arc::new(Self {
                respond: Box::new(respond),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<ChatRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for FakeBackend {
        async fn send_chat(&self, request: ChatRequest) -> Result<ChatReply> {
            let reply = (self.respond)(&request);
            self.requests.lock().unwrap().push(request);
            reply
        }
    }

    fn session_with(backend: Arc<FakeBackend>) -> ChatSession {
        ChatSession::new(backend, &Config::default())
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let backend = FakeBackend::new(|_| Ok(ChatReply::new("unused")));
        let mut session = session_with(backend.clone());

        assert_eq!(session.submit("   \n\t").await, SubmitOutcome::Ignored);
        assert!(session.transcript().is_empty());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_reply_replaces_placeholder() {
        let backend = FakeBackend::new(|request| {
            Ok(ChatReply::new(format!("you said **{}**", request.conversation[0].text)))
        });
        let mut session = session_with(backend.clone());

        let outcome = session.submit("  hi  ").await;
        assert_eq!(outcome, SubmitOutcome::Answered { index: 1 });

        let messages = session.transcript().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].body, MessageBody::Markup("hi".to_string()));
        assert_eq!(messages[1].sender, Sender::Bot);
        assert!(!messages[1].pending);
        assert_eq!(
            messages[1].body,
            MessageBody::Markup("you said <strong>hi</strong>".to_string())
        );
        assert_eq!(backend.requests(), vec![ChatRequest::single_turn("hi")]);
    }

    #[tokio::test]
    async fn test_missing_result_uses_fallback_text() {
        let backend = FakeBackend::new(|_| Ok(ChatReply::default()));
        let mut session = session_with(backend);

        assert_eq!(session.submit("hello").await, SubmitOutcome::EmptyReply { index: 1 });
        assert_eq!(
            session.transcript().last().unwrap().body,
            MessageBody::Text("Sorry, no response was received.".to_string())
        );
    }

    #[tokio::test]
    async fn test_error_message_is_shown_as_text() {
        let backend = FakeBackend::new(|_| Err(ChatClientError::Status { status: 500 }));
        let mut session = session_with(backend);

        let outcome = session.submit("hello").await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                index: 1,
                message: "Failed to get response from server.".to_string()
            }
        );
        let last = session.transcript().last().unwrap();
        assert!(!last.pending);
        assert_eq!(
            last.body,
            MessageBody::Text("Failed to get response from server.".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_error_message_uses_generic_text() {
        let backend = FakeBackend::new(|_| Err(ChatClientError::Other(String::new())));
        let mut session = session_with(backend);

        let outcome = session.submit("hello").await;
        assert_eq!(outcome.bot_index(), Some(1));
        assert_eq!(
            session.transcript().last().unwrap().body,
            MessageBody::Text("Failed to get a response from the server.".to_string())
        );
    }

    #[tokio::test]
    async fn test_failure_text_is_not_rendered() {
        let backend = FakeBackend::new(|_| Err(ChatClientError::Other("**<b>**".to_string())));
        let mut session = session_with(backend);

        session.submit("hello").await;
        assert_eq!(
            session.transcript().last().unwrap().to_html(),
            "<div class=\"message bot\"><p>**&lt;b&gt;**</p></div>"
        );
    }

    #[tokio::test]
    async fn test_custom_texts_from_config() {
        let config = Config {
            thinking_text: "Working".to_string(),
            empty_reply_text: "Nothing came back".to_string(),
            ..Config::default()
        };
        let backend = FakeBackend::new(|_| Ok(ChatReply::new("")));
        let mut session = ChatSession::new(backend, &config);

        session.submit("hello").await;
        assert_eq!(
            session.transcript().last().unwrap().body,
            MessageBody::Text("Nothing came back".to_string())
        );
    }

    #[tokio::test]
    async fn test_transcript_grows_across_submissions() {
        let backend = FakeBackend::new(|_| Ok(ChatReply::new("ok")));
        let mut session = session_with(backend);

        session.submit("one").await;
        let outcome = session.submit("two").await;
        assert_eq!(outcome, SubmitOutcome::Answered { index: 3 });
        assert_eq!(session.into_transcript().len(), 4);
    }
}
