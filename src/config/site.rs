//! Site configuration (_config.yml)

use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub site_title: String,
    pub default_author: String,
    pub timezone: String,

    // Remote API
    pub api_base_url: String,
    pub contact_url: String,
    pub timeout_secs: u64,

    // Listing
    pub page_size: usize,
    pub recent_limit: usize,
    pub related_limit: usize,

    // Rendering
    pub escape_html: bool,
    pub detail_path: String,

    // Preview server
    pub static_dir: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "Blog".to_string(),
            default_author: "Admin".to_string(),
            timezone: "UTC".to_string(),

            api_base_url: "http://localhost:8080/api".to_string(),
            contact_url: "http://localhost:8080/contact".to_string(),
            timeout_secs: 30,

            page_size: 6,
            recent_limit: 5,
            related_limit: 3,

            escape_html: false,
            detail_path: "/blog".to_string(),

            static_dir: None,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML or TOML file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SiteConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Find and load `_config.yml` or `_config.toml` in a directory
    pub fn discover<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        for name in ["_config.yml", "_config.yaml", "_config.toml"] {
            let candidate = base_dir.as_ref().join(name);
            if candidate.exists() {
                return Self::load(candidate);
            }
        }
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(anyhow!("page_size must be at least 1"));
        }
        if !self.detail_path.starts_with('/') {
            return Err(anyhow!("detail_path must start with '/'"));
        }
        self.tz()?;
        Ok(())
    }

    /// Parsed IANA timezone
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("unknown timezone {:?}: {}", self.timezone, e))
    }

    /// HTTP timeout, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Base URL of the blog collection (`{api_base_url}/blogs`)
    pub fn blogs_url(&self) -> String {
        format!("{}/blogs", self.api_base_url.trim_end_matches('/'))
    }
}
