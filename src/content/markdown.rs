//! Markdown-subset rendering
//!
//! Supports only what the blog editor produces: `#`/`##`/`###` headers,
//! fenced code blocks, inline code, `**bold**`, `*italic*` and paragraphs
//! separated by blank lines. The rules are plain textual substitutions
//! applied in a fixed order; there is no nesting model.
//!
//! Content is trusted author input. Literal HTML passes through unless
//! [`MarkdownRenderer::escaping`] is used.

use lazy_static::lazy_static;
use regex::Regex;

use crate::helpers::html_escape;

lazy_static! {
    static ref H3: Regex = Regex::new(r"(?m)^### (.*)$").unwrap();
    static ref H2: Regex = Regex::new(r"(?m)^## (.*)$").unwrap();
    static ref H1: Regex = Regex::new(r"(?m)^# (.*)$").unwrap();
    static ref FENCE: Regex = Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").unwrap();
}

/// Markdown-subset renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer {
    escape_html: bool,
}

impl MarkdownRenderer {
    /// Renderer for trusted content
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer that escapes literal HTML before applying the rules
    pub fn escaping() -> Self {
        Self { escape_html: true }
    }

    pub fn with_escape(escape_html: bool) -> Self {
        Self { escape_html }
    }

    /// Render content to an HTML fragment
    pub fn render(&self, content: &str) -> String {
        let content = content.replace("\r\n", "\n");
        let content = if self.escape_html {
            html_escape(&content)
        } else {
            content
        };

        // Longest prefix first so `###` is never read as `#`
        let html = H3.replace_all(&content, r#"<h3 class="mt-4 mb-3">${1}</h3>"#);
        let html = H2.replace_all(&html, r#"<h2 class="mt-5 mb-3">${1}</h2>"#);
        let html = H1.replace_all(&html, r#"<h1 class="mt-5 mb-4">${1}</h1>"#);

        let html = FENCE.replace_all(&html, r#"<pre><code class="language-${1}">${2}</code></pre>"#);
        let html = INLINE_CODE.replace_all(
            &html,
            r#"<code class="bg-light px-2 py-1 rounded">${1}</code>"#,
        );

        // Bold before italic, otherwise `**` would be eaten as two empty <em>
        let html = BOLD.replace_all(&html, "<strong>${1}</strong>");
        let html = ITALIC.replace_all(&html, "<em>${1}</em>");

        wrap_paragraphs(&html)
    }
}

/// Tags that open a chunk yet still belong inside a paragraph
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "br", "code", "em", "i", "img", "kbd", "mark", "small", "span", "strong",
    "sub", "sup",
];

/// Whether a chunk opens with block-level markup (headers, code blocks, raw HTML blocks)
fn starts_with_block(chunk: &str) -> bool {
    let Some(rest) = chunk.strip_prefix('<') else {
        return false;
    };
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    // comments, doctypes and closing tags are left alone
    name.is_empty() || !INLINE_TAGS.contains(&name.as_str())
}

/// Wrap blank-line separated chunks in `<p>` unless they already start with a block
fn wrap_paragraphs(html: &str) -> String {
    html.split("\n\n")
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| {
            if starts_with_block(chunk) {
                chunk.to_string()
            } else {
                format!(r#"<p class="mb-3">{}</p>"#, chunk)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render trusted content with the default renderer
pub fn render_markdown_subset(content: &str) -> String {
    MarkdownRenderer::new().render(content)
}
