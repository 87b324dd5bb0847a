//! Blog detail page: article and related posts

use crate::config::SiteConfig;
use crate::content::{Post, RenderContext};
use crate::helpers::detail_href;

const NO_RELATED: &str = r#"<p class="text-muted">No related posts available.</p>"#;

/// Recent posts minus the one being viewed
pub fn related_posts(recent: Vec<Post>, current_slug: Option<&str>) -> Vec<Post> {
    recent
        .into_iter()
        .filter(|p| p.slug.as_deref() != current_slug)
        .collect()
}

/// Full article markup: header, rendered body and footer
pub fn render_post(ctx: &RenderContext, post: &Post) -> String {
    let view = ctx.derive(post);
    format!(
        r#"<header class="mb-4"><div class="d-flex align-items-center mb-3"><span class="badge {badge} me-2">{category}</span><small class="text-muted me-3"><i class="fas fa-calendar me-1"></i>{date}</small><small class="text-muted me-3"><i class="fas fa-clock me-1"></i>{read} min read</small><small class="text-muted"><i class="fas fa-eye me-1"></i>{views} views</small></div><h1 class="display-4 fw-bold mb-3">{title}</h1><p class="lead text-muted">{excerpt}</p><div class="author-info d-flex align-items-center"><i class="fas fa-user-circle text-primary me-2"></i><div class="fw-semibold">{author}</div></div></header>
<div class="blog-content">
{body}
</div>
<footer class="mt-5 pt-4 border-top"><small class="text-muted">Published on {date} &bull; {read} min read</small></footer>"#,
        badge = view.badge_class,
        category = view.category,
        date = view.formatted_date,
        read = view.read_time_minutes,
        views = post.view_count,
        title = post.title_or_default(),
        excerpt = post.excerpt.as_deref().unwrap_or(""),
        author = post.author.as_deref().unwrap_or(""),
        body = view.html_body,
    )
}

/// Related posts sidebar
pub fn render_related(config: &SiteConfig, ctx: &RenderContext, posts: &[Post]) -> String {
    if posts.is_empty() {
        return NO_RELATED.to_string();
    }

    posts
        .iter()
        .map(|post| {
            format!(
                r#"<div class="mb-3"><a href="{}" class="text-decoration-none"><h6 class="mb-1">{}</h6><p class="mb-1 small text-muted">{}</p><small class="text-muted">{}</small></a></div>"#,
                detail_href(&config.detail_path, post.slug_or_default()),
                post.title_or_default(),
                post.excerpt.as_deref().unwrap_or(""),
                ctx.derive(post).relative_age
            )
        })
        .collect()
}
