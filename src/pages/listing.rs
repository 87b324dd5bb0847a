//! Blog listing page: featured post, card grid and pagination

use crate::config::SiteConfig;
use crate::content::{PageEnvelope, Post, RenderContext};
use crate::helpers::{detail_href, paginate, Pagination};

const EMPTY_LISTING: &str = r#"<div class="col-12"><div class="alert alert-info text-center"><h5>No blog posts found</h5><p>Check back later for new content!</p></div></div>"#;

/// A listing page split into its display sections
#[derive(Debug, Clone)]
pub struct Listing {
    /// Shown prominently, only ever set on the first page
    pub featured: Option<Post>,
    pub grid: Vec<Post>,
    pub pagination: Option<Pagination>,
}

impl Listing {
    /// Split an envelope. The first post of page 0 is pulled out of the
    /// grid when it is flagged as featured.
    pub fn from_envelope(envelope: PageEnvelope) -> Self {
        let pagination = paginate(envelope.number, envelope.total_pages);
        let mut grid = envelope.content;

        let featured = if envelope.number == 0 && grid.first().is_some_and(|p| p.is_featured) {
            Some(grid.remove(0))
        } else {
            None
        };

        Self {
            featured,
            grid,
            pagination,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.featured.is_none() && self.grid.is_empty()
    }

    /// Render all sections
    pub fn render<F>(&self, config: &SiteConfig, ctx: &RenderContext, page_href: F) -> ListingHtml
    where
        F: Fn(usize) -> String,
    {
        let pagination = self
            .pagination
            .as_ref()
            .map(|p| p.to_html(page_href))
            .unwrap_or_default();

        if self.is_empty() {
            return ListingHtml {
                featured: String::new(),
                grid: EMPTY_LISTING.to_string(),
                pagination,
            };
        }

        ListingHtml {
            featured: self
                .featured
                .as_ref()
                .map(|p| featured_post(config, ctx, p))
                .unwrap_or_default(),
            grid: self.grid.iter().map(|p| post_card(config, ctx, p)).collect(),
            pagination,
        }
    }
}

/// Rendered listing sections; empty strings mean "hide this section"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingHtml {
    pub featured: String,
    pub grid: String,
    pub pagination: String,
}

/// Featured post block
pub fn featured_post(config: &SiteConfig, ctx: &RenderContext, post: &Post) -> String {
    let view = ctx.derive(post);
    let href = detail_href(&config.detail_path, post.slug_or_default());
    format!(
        r#"<article class="card featured-post"><div class="card-body p-0"><div class="p-4"><div class="d-flex align-items-center mb-3"><span class="badge bg-primary me-2">Featured</span><small class="text-muted"><i class="fas fa-calendar me-1"></i>{date}</small></div><h2 class="card-title"><a href="{href}" class="text-decoration-none text-dark">{title}</a></h2><p class="card-text">{excerpt}</p><div class="d-flex justify-content-between align-items-center"><a href="{href}" class="btn btn-primary">Read More</a><small class="text-muted"><i class="fas fa-clock me-1"></i>{read} min read</small></div></div></div></article>"#,
        date = view.formatted_date,
        href = href,
        title = post.title_or_default(),
        excerpt = post.excerpt_or_default(),
        read = view.read_time_minutes,
    )
}

/// Summary card for the grid
pub fn post_card(config: &SiteConfig, ctx: &RenderContext, post: &Post) -> String {
    let view = ctx.derive(post);
    let href = detail_href(&config.detail_path, post.slug_or_default());
    format!(
        r#"<div class="col-md-6 mb-4"><article class="card h-100"><div class="card-body"><div class="d-flex align-items-center mb-3"><span class="badge {badge} me-2">{category}</span><small class="text-muted"><i class="fas fa-calendar me-1"></i>{date}</small></div><h5 class="card-title"><a href="{href}" class="text-decoration-none text-dark">{title}</a></h5><p class="card-text">{excerpt}</p><div class="d-flex justify-content-between align-items-center"><a href="{href}" class="btn btn-outline-primary btn-sm">Read More</a><small class="text-muted"><i class="fas fa-clock me-1"></i>{read} min read</small></div></div></article></div>"#,
        badge = view.badge_class,
        category = view.category,
        date = view.formatted_date,
        href = href,
        title = post.title_or_default(),
        excerpt = post.excerpt_or_default(),
        read = view.read_time_minutes,
    )
}
