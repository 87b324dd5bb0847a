//! List helper functions for the blog sidebar: categories, recent posts, stats

use indexmap::IndexMap;

use super::html::{detail_href, encode_component, format_number};
use crate::config::SiteConfig;
use crate::content::{BlogStats, Category, Post, RenderContext};

const NO_CATEGORIES: &str = r#"<p class="text-muted">No categories available.</p>"#;
const NO_RECENT: &str = r#"<p class="text-muted">No recent posts available.</p>"#;

/// Count posts per inferred category, most common first.
///
/// Ties keep the order in which categories were first seen.
pub fn count_categories(posts: &[Post]) -> Vec<(Category, usize)> {
    let mut categories: IndexMap<Category, usize> = IndexMap::new();

    for post in posts {
        *categories
            .entry(Category::infer(post.title.as_deref()))
            .or_insert(0) += 1;
    }

    let mut sorted: Vec<_> = categories.into_iter().collect();
    // stable sort keeps first-seen order among equal counts
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Link to the listing filtered by a category
pub fn category_href(config: &SiteConfig, category: Category) -> String {
    format!(
        "{}/category/{}",
        config.detail_path.trim_end_matches('/'),
        encode_component(category.label())
    )
}

/// Generate the category list as HTML
pub fn list_categories(config: &SiteConfig, posts: &[Post], active: Option<Category>) -> String {
    let categories = count_categories(posts);
    if categories.is_empty() {
        return NO_CATEGORIES.to_string();
    }

    let mut html = String::from(r#"<ul class="list-unstyled">"#);

    for (category, count) in categories {
        let active_class = if active == Some(category) { " active" } else { "" };
        html.push_str(&format!(
            r#"<li class="mb-2"><a href="{}" class="text-decoration-none category-link{}" data-category="{}"><i class="{} me-2"></i>{}<span class="badge bg-light text-dark ms-2">{}</span></a></li>"#,
            category_href(config, category),
            active_class,
            category.label(),
            category.icon(),
            category.label(),
            count
        ));
    }

    html.push_str("</ul>");
    html
}

/// Generate the recent posts list as HTML
pub fn list_recent_posts(config: &SiteConfig, ctx: &RenderContext, posts: &[Post]) -> String {
    if posts.is_empty() {
        return NO_RECENT.to_string();
    }

    posts
        .iter()
        .map(|post| {
            let view = ctx.derive(post);
            format!(
                r#"<a href="{}" class="list-group-item list-group-item-action border-0 px-0"><div class="d-flex w-100 justify-content-between"><h6 class="mb-1">{}</h6><small>{}</small></div><p class="mb-1 small text-muted">{}</p></a>"#,
                detail_href(&config.detail_path, post.slug_or_default()),
                post.title_or_default(),
                view.relative_age,
                post.excerpt.as_deref().unwrap_or("")
            )
        })
        .collect()
}

/// Generate the statistics block as HTML
pub fn blog_stats(stats: Option<&BlogStats>) -> String {
    let Some(stats) = stats else {
        return r#"<p class="text-muted">Statistics not available.</p>"#.to_string();
    };

    format!(
        r#"<div class="row text-center"><div class="col-6 mb-3"><div class="stat-item"><h4 class="text-primary mb-1">{}</h4><p class="mb-0 small text-muted">Total Posts</p></div></div><div class="col-6 mb-3"><div class="stat-item"><h4 class="text-success mb-1">{}</h4><p class="mb-0 small text-muted">Total Views</p></div></div></div>"#,
        stats.total_blogs,
        format_number(stats.total_views)
    )
}
