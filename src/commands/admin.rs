//! Create, update and delete posts

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::Path;

use crate::admin::{AdminSession, PostDraft};
use crate::content::PostId;
use crate::Folio;

/// Read a draft from a YAML file
pub fn load_draft(path: &Path) -> Result<PostDraft> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read draft {:?}", path))?;
    let draft: PostDraft = serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid draft {:?}", path))?;
    Ok(draft)
}

/// Save a draft: update when it carries an `id`, create otherwise
pub fn save(folio: &Folio, path: &Path) -> Result<()> {
    let draft = load_draft(path)?;
    let mut session = AdminSession::new(folio.client(), folio.config.default_author.clone());
    let post = session.save(&draft, Utc::now())?;

    println!(
        "{} post {} ({})",
        if draft.id.is_some() { "Updated" } else { "Created" },
        post.id.map(|id| id.to_string()).unwrap_or_default(),
        post.slug.unwrap_or_default()
    );
    println!("{} posts total", session.index().len());
    Ok(())
}

pub fn delete(folio: &Folio, id: &str) -> Result<()> {
    let mut session = AdminSession::new(folio.client(), folio.config.default_author.clone());
    session.delete(&PostId::from(id))?;
    println!("Deleted post {}", id);
    Ok(())
}
