pub mod api;
pub mod client_trait;
pub mod error;
pub mod session;

pub use api::client::HttpChatClient;
pub use api::models::{ChatReply, ChatRequest, ConversationTurn};
pub use chat_core::Config;
pub use client_trait::ChatBackend;
pub use error::{ChatClientError, Result};
pub use session::{ChatSession, SubmitOutcome};
