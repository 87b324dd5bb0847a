//! Presentation fields derived from a post
//!
//! A [`DerivedView`] is rebuilt on every render and never stored.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::category::Category;
use super::markdown::MarkdownRenderer;
use super::post::Post;
use crate::helpers::{format_absolute_date, format_relative_age};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Reading speed used for estimates
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimate when there is no text to measure
pub const DEFAULT_READ_TIME: usize = 5;

/// Estimate reading time in whole minutes, rounded up.
///
/// Missing or empty text yields [`DEFAULT_READ_TIME`]; any other input is
/// at least one minute. Words are the pieces between whitespace runs, so
/// leading or trailing whitespace counts as one empty word.
pub fn estimate_read_time(content: Option<&str>) -> usize {
    match content {
        None | Some("") => DEFAULT_READ_TIME,
        Some(text) => {
            let words = WHITESPACE.split(text).count();
            words.div_ceil(WORDS_PER_MINUTE)
        }
    }
}

/// Shared inputs for deriving views
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub now: DateTime<Utc>,
    pub tz: Tz,
    pub markdown: MarkdownRenderer,
}

impl RenderContext {
    pub fn new(now: DateTime<Utc>, tz: Tz) -> Self {
        Self {
            now,
            tz,
            markdown: MarkdownRenderer::new(),
        }
    }

    pub fn with_markdown(mut self, markdown: MarkdownRenderer) -> Self {
        self.markdown = markdown;
        self
    }

    /// Derive presentation fields for a post
    pub fn derive(&self, post: &Post) -> DerivedView {
        let category = Category::infer(post.title.as_deref());
        DerivedView {
            category,
            badge_class: category.badge_class(),
            read_time_minutes: estimate_read_time(post.reading_text()),
            formatted_date: format_absolute_date(post.published_at.as_deref(), &self.tz),
            relative_age: format_relative_age(post.published_at.as_deref(), &self.now, &self.tz),
            html_body: self.markdown.render(post.content.as_deref().unwrap_or("")),
        }
    }
}

/// Display-ready fields of one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedView {
    pub category: Category,
    pub badge_class: &'static str,
    pub read_time_minutes: usize,
    pub formatted_date: String,
    pub relative_age: String,
    pub html_body: String,
}

/// Derive presentation fields with the default renderer
pub fn derive(post: &Post, now: DateTime<Utc>, tz: Tz) -> DerivedView {
    RenderContext::new(now, tz).derive(post)
}
