//! Show a single post

use anyhow::Result;
use chrono::Utc;

use crate::content::Post;
use crate::helpers::format_number;
use crate::pages::render_post;
use crate::Folio;

/// Print a post's derived fields, or its full HTML with `html`
pub fn run(folio: &Folio, slug: &str, html: bool) -> Result<()> {
    let post = folio.client().get_by_slug(slug)?;
    let now = Utc::now();

    if html {
        println!("{}", render_post(&folio.render_context(now)?, &post));
    } else {
        print!("{}", summary(folio, &post, now)?);
    }
    Ok(())
}

/// Plain-text summary block
pub fn summary(folio: &Folio, post: &Post, now: chrono::DateTime<Utc>) -> Result<String> {
    let ctx = folio.render_context(now)?;
    let view = ctx.derive(post);

    let mut out = String::new();
    out.push_str(&format!("{}\n", post.title_or_default()));
    out.push_str(&format!("  Category:  {} ({})\n", view.category, view.badge_class));
    out.push_str(&format!("  Author:    {}\n", post.author.as_deref().unwrap_or("-")));
    out.push_str(&format!(
        "  Published: {} {}\n",
        view.formatted_date, view.relative_age
    ));
    out.push_str(&format!("  Read time: {} min\n", view.read_time_minutes));
    out.push_str(&format!("  Views:     {}\n", format_number(post.view_count)));
    if !post.tags.is_empty() {
        out.push_str(&format!("  Tags:      {}\n", post.tags.join(", ")));
    }
    out.push_str(&format!("\n{}\n", post.excerpt_or_default()));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use chrono::TimeZone;

    #[test]
    fn test_summary() {
        let folio = Folio::with_config(SiteConfig::default(), ".");
        let post = Post {
            title: Some("Leading a Remote Team".to_string()),
            author: Some("Sam".to_string()),
            tags: vec!["people".to_string()],
            view_count: 2500,
            published_at: Some("2024-01-20T08:00:00Z".to_string()),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 30, 8, 0, 0).unwrap();
        let text = summary(&folio, &post, now).unwrap();
        assert!(text.starts_with("Leading a Remote Team\n"));
        assert!(text.contains("Category:  Leadership (bg-primary)"));
        assert!(text.contains("Published: January 20, 2024 2 weeks ago"));
        assert!(text.contains("Views:     2.5K"));
        assert!(text.contains("Tags:      people"));
        assert!(text.ends_with("No excerpt available.\n"));
    }
}
