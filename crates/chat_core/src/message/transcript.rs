//! Transcript - ordered list of displayed messages
//!
//! Append-only, except that a pending placeholder is resolved in place once
//! its request settles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ChatMessage, MessageBody};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("No message at index {0}")]
    NotFound(usize),

    #[error("Message at index {0} is not pending")]
    NotPending(usize),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its index
    pub fn push(&mut self, message: ChatMessage) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    /// Replace the body of a pending message and clear its pending flag
    pub fn resolve(&mut self, index: usize, body: MessageBody) -> Result<(), TranscriptError> {
        let message = self
            .messages
            .get_mut(index)
            .ok_or(TranscriptError::NotFound(index))?;
        if !message.pending {
            return Err(TranscriptError::NotPending(index));
        }
        message.body = body;
        message.pending = false;
        Ok(())
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&ChatMessage> {
        self.messages.get(index)
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Concatenated fragments of every message, in order
    pub fn to_html(&self) -> String {
        self.messages.iter().map(ChatMessage::to_html).collect()
    }
}
