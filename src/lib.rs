//! folio-rs: content rendering for a REST-backed blog
//!
//! This crate fetches posts from a blogging API and turns them into
//! display-ready HTML fragments: derived fields (category, read time,
//! dates), a small markdown subset, listing pages with pagination, and the
//! admin and contact workflows that write back to the API.

pub mod admin;
pub mod api;
pub mod commands;
pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod helpers;
pub mod pages;
pub mod server;
pub mod submission;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::content::{MarkdownRenderer, RenderContext};

/// The main application: configuration resolved against a base directory
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
}

impl Folio {
    /// Create a new instance, loading `_config.yml` from `base_dir` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config = config::SiteConfig::discover(&base_dir)?;
        Ok(Self { config, base_dir })
    }

    pub fn with_config<P: AsRef<Path>>(config: config::SiteConfig, base_dir: P) -> Self {
        Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// API client for the configured backend
    pub fn client(&self) -> api::BlogClient {
        api::BlogClient::new(&self.config)
    }

    /// Rendering inputs for one request or command, with `now` fixed by the caller
    pub fn render_context(&self, now: DateTime<Utc>) -> Result<RenderContext> {
        Ok(RenderContext::new(now, self.config.tz()?)
            .with_markdown(MarkdownRenderer::with_escape(self.config.escape_html)))
    }

    /// Directory of static assets for the preview server
    pub fn static_dir(&self) -> Option<PathBuf> {
        self.config
            .static_dir
            .as_ref()
            .map(|dir| self.base_dir.join(dir))
    }
}
