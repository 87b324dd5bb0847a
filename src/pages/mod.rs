//! Page assembly: listing and detail fragments, plus the page shell

mod detail;
mod listing;

pub use detail::{related_posts, render_post, render_related};
pub use listing::{featured_post, post_card, Listing, ListingHtml};

use crate::helpers::html_escape;

/// Loading / error / content toggle shared by every page section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Content(T),
}

impl<T> ViewState<T> {
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => ViewState::Content(value),
            Err(e) => ViewState::Error(e.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            ViewState::Content(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Error(e) => ViewState::Error(e),
            ViewState::Content(value) => ViewState::Content(f(value)),
        }
    }
}

/// Block shown when a page section failed to load
pub fn error_block(message: &str) -> String {
    format!(
        r#"<div class="alert alert-danger text-center"><h5>Unable to load content</h5><p class="mb-0">{}</p></div>"#,
        html_escape(message)
    )
}

/// Wrap fragments in a minimal HTML document
pub fn layout(title: &str, main: &str, sidebar: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{}</title>
</head>
<body>
<div class="container py-5"><div class="row">
<main class="col-lg-8">{}</main>
<aside class="col-lg-4">{}</aside>
</div></div>
</body>
</html>
"#,
        html_escape(title),
        main,
        sidebar
    )
}
