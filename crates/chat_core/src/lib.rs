//! chat_core - Rendering and message types for the chat widget
//!
//! This crate holds everything that does not touch the network:
//! - `markdown` - the chat markdown to HTML renderer
//! - `message` - ChatMessage, MessageBody, Transcript
//! - `config` - endpoint and display text configuration

pub mod config;
pub mod markdown;
pub mod message;
pub mod paths;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use markdown::{render_markdown, MarkdownPass, PIPELINE};
pub use message::{escape_text, ChatMessage, MessageBody, Sender, Transcript, TranscriptError};
