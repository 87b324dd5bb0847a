//! Content module - post model, markdown subset and derived presentation fields

mod category;
mod markdown;
pub(crate) mod post;
mod view;

pub use category::{
    category_badge_class, category_icon, category_search_terms, infer_category, Category,
    CATEGORY_RULES, FALLBACK_BADGE_CLASS,
};
pub use markdown::{render_markdown_subset, MarkdownRenderer};
pub use post::{split_tags, BlogStats, PageEnvelope, Post, PostId, PostStatus};
pub use view::{
    derive, estimate_read_time, DerivedView, RenderContext, DEFAULT_READ_TIME, WORDS_PER_MINUTE,
};
