//! List and search posts

use anyhow::Result;

use crate::admin::PostIndex;
use crate::content::{Post, RenderContext};
use crate::pages::Listing;
use crate::Folio;

/// One listing line: date, category, title, slug and read time
pub fn format_row(ctx: &RenderContext, post: &Post) -> String {
    let view = ctx.derive(post);
    format!(
        "  {} - {} [{}] {} ({} min read)",
        if view.formatted_date.is_empty() {
            "----"
        } else {
            view.formatted_date.as_str()
        },
        post.title_or_default(),
        view.category,
        post.slug_or_default(),
        view.read_time_minutes
    )
}

fn print_listing(ctx: &RenderContext, listing: &Listing, page: usize, total_pages: usize) {
    if listing.is_empty() {
        println!("No blog posts found");
        return;
    }
    if let Some(featured) = &listing.featured {
        println!("Featured:");
        println!("{}", format_row(ctx, featured));
    }
    println!("Posts (page {} of {}):", page + 1, total_pages.max(1));
    for post in &listing.grid {
        println!("{}", format_row(ctx, post));
    }
}

/// Print one page of the listing
pub fn run(folio: &Folio, page: usize, size: Option<usize>) -> Result<()> {
    let ctx = folio.render_context(chrono::Utc::now())?;
    let size = size.unwrap_or(folio.config.page_size).max(1);

    let envelope = folio.client().page(page, size)?;
    let total_pages = envelope.total_pages;
    let listing = Listing::from_envelope(envelope);
    print_listing(&ctx, &listing, page, total_pages);
    Ok(())
}

/// Print one page of server-side search results
pub fn search(folio: &Folio, term: &str, page: usize) -> Result<()> {
    let ctx = folio.render_context(chrono::Utc::now())?;
    let envelope = folio.client().search(term, page, folio.config.page_size)?;
    let total_pages = envelope.total_pages;
    println!("Search results for \"{}\":", term);
    print_listing(&ctx, &Listing::from_envelope(envelope), page, total_pages);
    Ok(())
}

/// Filter every post locally by title, author, tags and slug
pub fn filter(folio: &Folio, query: &str) -> Result<()> {
    let index = PostIndex::load(&folio.client())?;
    let matches = index.filter(query);
    println!("Matches ({} of {}):", matches.len(), index.len());
    for post in matches {
        println!(
            "  {} - {} [{}] by {}",
            post.id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
            post.title_or_default(),
            post.slug_or_default(),
            post.author.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
