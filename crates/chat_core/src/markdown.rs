//! Markdown renderer for chat messages.
//!
//! A deliberately small dialect: fenced code blocks, inline code, bold,
//! italic and flat unordered lists. Rendering is a fixed sequence of
//! substitution passes over the whole string. Each pass sees the output of
//! the previous one, so the order of [`PIPELINE`] is part of the contract:
//! list merging only works because the list pass already produced adjacent
//! `<ul>` wrappers, and escaping must run before anything inserts markup.
//!
//! Code block content is not shielded from the later passes. Bold, italic,
//! list and line-break rules still apply inside `<pre><code>`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Fence, optional word-character language tag, newline, lazy body, fence.
static FENCED_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```([A-Za-z0-9_]*)\n(.*?)```").expect("fenced code pattern")
});

static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern"));

// Emphasis and list bodies never cross a line terminator.
static BOLD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]*?)\*\*").expect("bold pattern")
});

static ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*([^\n\r\x{2028}\x{2029}]*?)\*").expect("italic pattern")
});

/// Whitespace as web content sees it: includes U+FEFF, excludes U+0085.
const WHITESPACE_CLASS: &str = r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

/// Group 1 is the line start: text start or the terminator before it, which
/// the replacement writes back. Leading whitespace may also eat blank lines
/// above the item.
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(\A|[\n\r\x{{2028}}\x{{2029}}]){WHITESPACE_CLASS}*[*-] ([^\n\r\x{{2028}}\x{{2029}}]*)"
    ))
    .expect("list item pattern")
});

const LIST_BOUNDARY: &str = "</ul>\n<ul>";

/// One named step of the rendering pipeline.
#[derive(Clone, Copy)]
pub struct MarkdownPass {
    pub name: &'static str,
    transform: fn(&str) -> String,
}

impl std::fmt::Debug for MarkdownPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownPass").field("name", &self.name).finish()
    }
}

impl MarkdownPass {
    const fn new(name: &'static str, transform: fn(&str) -> String) -> Self {
        Self { name, transform }
    }

    pub fn apply(&self, input: &str) -> String {
        (self.transform)(input)
    }
}

/// Rendering passes in execution order.
pub static PIPELINE: [MarkdownPass; 8] = [
    MarkdownPass::new("escape", escape_angle_brackets),
    MarkdownPass::new("fenced_code", fenced_code_blocks),
    MarkdownPass::new("inline_code", inline_code),
    MarkdownPass::new("bold", bold),
    MarkdownPass::new("italic", italic),
    MarkdownPass::new("list_items", list_items),
    MarkdownPass::new("merge_lists", merge_adjacent_lists),
    MarkdownPass::new("line_breaks", line_breaks),
];

/// Render chat markdown into an HTML fragment.
///
/// Total over all inputs: malformed markdown is never an error, unmatched
/// delimiters are left in the output as literal characters.
pub fn render_markdown(text: &str) -> String {
    PIPELINE
        .iter()
        .fold(text.to_string(), |html, pass| pass.apply(&html))
}

/// Neutralise markup in the raw text. Only `<` and `>` are touched.
pub fn escape_angle_brackets(input: &str) -> String {
    input.replace('<', "&lt;").replace('>', "&gt;")
}

fn fenced_code_blocks(input: &str) -> String {
    FENCED_CODE
        .replace_all(input, |caps: &Captures| {
            let language = match caps.get(1).map(|m| m.as_str()) {
                Some(lang) if !lang.is_empty() => format!(" class=\"language-{lang}\""),
                _ => String::new(),
            };
            let code = caps
                .get(2)
                .map_or("", |m| m.as_str())
                .trim_matches(is_whitespace);
            format!("<pre><code{language}>{code}</code></pre>")
        })
        .into_owned()
}

fn inline_code(input: &str) -> String {
    INLINE_CODE
        .replace_all(input, "<code>${1}</code>")
        .into_owned()
}

fn bold(input: &str) -> String {
    BOLD.replace_all(input, "<strong>${1}</strong>").into_owned()
}

fn italic(input: &str) -> String {
    ITALIC.replace_all(input, "<em>${1}</em>").into_owned()
}

fn list_items(input: &str) -> String {
    LIST_ITEM
        .replace_all(input, "${1}<ul><li>${2}</li></ul>")
        .into_owned()
}

fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn merge_adjacent_lists(input: &str) -> String {
    input.replace(LIST_BOUNDARY, "")
}

fn line_breaks(input: &str) -> String {
    input.replace('\n', "<br>")
}
