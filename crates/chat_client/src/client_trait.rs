use async_trait::async_trait;

use crate::api::models::{ChatReply, ChatRequest};
use crate::error::Result;

/// Anything that can answer a chat request. The session only talks to this
/// trait, so tests can swap the HTTP client for an in-process fake.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_chat(&self, request: ChatRequest) -> Result<ChatReply>;
}
