//! Properties of the chat markdown renderer that callers rely on

use chat_core::markdown::escape_angle_brackets;
use chat_core::render_markdown;

/// Inputs with no backticks, asterisks, or list markers.
const PLAIN_INPUTS: &[&str] = &[
    "hello world",
    "line one\nline two",
    "a < b && c > d",
    "price: $5 + 3 = $8",
    "tabs\tand  spaces",
    "unicode ✓ ünïcödé 漢字",
    "trailing newline\n",
    "\n\n",
    "already &lt;escaped&gt;",
    "hyphen-in-word and a-b",
];

#[test]
fn test_plain_text_is_escaped_with_breaks() {
    for input in PLAIN_INPUTS {
        let expected = escape_angle_brackets(input).replace('\n', "<br>");
        assert_eq!(render_markdown(input), expected, "input {input:?}");
    }
}

#[test]
fn test_render_is_deterministic() {
    let input = "**a** *b* `c`\n- d\n- e\n```py\nprint(1)\n```";
    assert_eq!(render_markdown(input), render_markdown(input));
}

#[test]
fn test_script_tags_never_survive() {
    let inputs = [
        "<script>alert(1)</script>",
        "**<script>**",
        "`<script>`",
        "```html\n<script src=x></script>\n```",
        "- <script>",
    ];
    for input in inputs {
        let html = render_markdown(input);
        assert!(!html.contains("<script"), "input {input:?} gave {html:?}");
        assert!(html.contains("&lt;script"), "input {input:?} gave {html:?}");
    }
}

#[test]
fn test_output_uses_only_known_tags() {
    let html = render_markdown(
        "# not a heading\n**bold** *em* `code`\n* one\n* two\n```rust\nlet x = 1;\n```\n[link](http://x)",
    );
    let allowed = [
        "<pre>", "</pre>", "<code>", "<code class=\"language-rust\">", "</code>", "<strong>",
        "</strong>", "<em>", "</em>", "<ul>", "</ul>", "<li>", "</li>", "<br>",
    ];
    let mut rest = html.as_str();
    while let Some(start) = rest.find('<') {
        let end = start + rest[start..].find('>').expect("unterminated tag") + 1;
        let tag = &rest[start..end];
        assert!(allowed.contains(&tag), "unexpected tag {tag:?} in {html:?}");
        rest = &rest[end..];
    }
}

#[test]
fn test_full_reply_rendering() {
    let reply = "Here is **the plan**:\n* install `cargo`\n- run *tests*\n```sh\ncargo test\n```";
    assert_eq!(
        render_markdown(reply),
        "Here is <strong>the plan</strong>:<br>\
         <ul><li>install <code>cargo</code></li><li>run <em>tests</em></li></ul><br>\
         <pre><code class=\"language-sh\">cargo test</code></pre>"
    );
}

#[test]
fn test_render_twice_is_not_idempotent_for_markup() {
    let once = render_markdown("**x**");
    assert_eq!(once, "<strong>x</strong>");
    assert_eq!(render_markdown(&once), "&lt;strong&gt;x&lt;/strong&gt;");
}
