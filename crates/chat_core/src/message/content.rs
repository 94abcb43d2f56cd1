//! MessageBody - what a chat bubble displays
//!
//! A body is either renderer output, inserted as markup, or plain text that
//! has to be escaped before it lands in a fragment.

use serde::{Deserialize, Serialize};

use crate::markdown::render_markdown;

/// Displayable content of a single message.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MessageBody {
    /// HTML produced by the markdown renderer, inserted as-is.
    Markup(String),
    /// Plain text, shown literally.
    Text(String),
}

impl MessageBody {
    /// Render markdown source into a markup body
    pub fn markdown(source: &str) -> Self {
        Self::Markup(render_markdown(source))
    }

    /// Create a plain text body
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Fragment suitable for insertion into a message container
    pub fn to_html(&self) -> String {
        match self {
            Self::Markup(html) => html.clone(),
            Self::Text(text) => escape_text(text),
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Self::Markup(_))
    }
}

/// Escape text the way a text-content assignment would serialise it.
///
/// Unlike the renderer's escape pass this also handles `&`, so the result
/// reads back as exactly the input text.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_body() {
        let body = MessageBody::markdown("**hi**");
        assert!(body.is_markup());
        assert_eq!(body.to_html(), "<strong>hi</strong>");
    }

    #[test]
    fn test_text_body_is_escaped() {
        let body = MessageBody::text("a < b && **c**");
        assert!(!body.is_markup());
        assert_eq!(body.to_html(), "a &lt; b &amp;&amp; **c**");
    }

    #[test]
    fn test_body_serialization() {
        let json = serde_json::to_string(&MessageBody::text("x")).unwrap();
        assert_eq!(json, r#"{"type":"text","value":"x"}"#);
    }
}
