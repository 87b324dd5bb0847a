//! HTML helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Percent-encode a single URL component (path segment or query value)
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Permalink of a post detail page
///
/// # Examples
/// ```ignore
/// detail_href("/blog", "hello world") // -> "/blog/hello%20world"
/// ```
pub fn detail_href(detail_path: &str, slug: &str) -> String {
    format!(
        "{}/{}",
        detail_path.trim_end_matches('/'),
        encode_component(slug)
    )
}

/// Compact counter: `1500` -> `1.5K`
pub fn format_number(n: u64) -> String {
    if n >= 1000 {
        format!("{:.1}K", n as f64 / 1000.0)
    } else {
        n.to_string()
    }
}
