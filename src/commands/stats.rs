//! Blog statistics

use anyhow::Result;

use crate::helpers::{count_categories, format_number};
use crate::Folio;

/// Print totals and the per-category breakdown
pub fn run(folio: &Folio) -> Result<()> {
    let client = folio.client();

    match client.stats() {
        Ok(stats) => {
            println!("Total posts: {}", stats.total_blogs);
            println!("Total views: {}", format_number(stats.total_views));
        }
        Err(e) => {
            tracing::warn!("Failed to load stats: {}", e);
            println!("Statistics not available.");
        }
    }

    let posts = client.list_all()?;
    let categories = count_categories(&posts);
    println!("Categories ({}):", categories.len());
    for (category, count) in categories {
        println!("  {} ({})", category, count);
    }

    Ok(())
}
