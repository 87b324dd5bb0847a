//! Blog endpoints

use tracing::info;

use super::{form_encode, BlogClient};
use crate::admin::PostPayload;
use crate::content::{BlogStats, PageEnvelope, Post, PostId};
use crate::error::ApiError;
use crate::helpers::encode_component;

impl BlogClient {
    /// Every post, unpaginated
    pub fn list_all(&self) -> Result<Vec<Post>, ApiError> {
        self.get_json(&self.blogs_url)
    }

    /// Single post by identifier
    pub fn get(&self, id: &PostId) -> Result<Post, ApiError> {
        self.get_json(&format!(
            "{}/{}",
            self.blogs_url,
            encode_component(&id.to_string())
        ))
    }

    /// Single post by slug
    pub fn get_by_slug(&self, slug: &str) -> Result<Post, ApiError> {
        self.get_json(&format!(
            "{}/slug/{}",
            self.blogs_url,
            encode_component(slug)
        ))
    }

    /// One page of the listing
    pub fn page(&self, page: usize, size: usize) -> Result<PageEnvelope, ApiError> {
        let query = form_encode(&[("page", page.to_string()), ("size", size.to_string())]);
        self.get_json(&format!("{}/page?{}", self.blogs_url, query))
    }

    /// One page of search results
    pub fn search(&self, term: &str, page: usize, size: usize) -> Result<PageEnvelope, ApiError> {
        let query = form_encode(&[
            ("q", term.to_string()),
            ("page", page.to_string()),
            ("size", size.to_string()),
        ]);
        self.get_json(&format!("{}/search?{}", self.blogs_url, query))
    }

    /// Most recent posts
    pub fn recent(&self, limit: usize) -> Result<Vec<Post>, ApiError> {
        self.get_json(&format!("{}/recent?limit={}", self.blogs_url, limit))
    }

    pub fn featured(&self) -> Result<Vec<Post>, ApiError> {
        self.get_json(&format!("{}/featured", self.blogs_url))
    }

    pub fn stats(&self) -> Result<BlogStats, ApiError> {
        self.get_json(&format!("{}/stats", self.blogs_url))
    }

    /// Create a post; the server assigns id and counters
    pub fn create(&self, payload: &PostPayload) -> Result<Post, ApiError> {
        let body = self.send_json("POST", &self.blogs_url, payload)?;
        let post: Post = serde_json::from_str(&body)?;
        info!("Created post {:?}", post.slug);
        Ok(post)
    }

    pub fn update(&self, id: &PostId, payload: &PostPayload) -> Result<Post, ApiError> {
        let url = format!("{}/{}", self.blogs_url, encode_component(&id.to_string()));
        let body = self.send_json("PUT", &url, payload)?;
        let post: Post = serde_json::from_str(&body)?;
        info!("Updated post {}", id);
        Ok(post)
    }

    pub fn delete(&self, id: &PostId) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.blogs_url, encode_component(&id.to_string()));
        self.delete_url(&url)?;
        info!("Deleted post {}", id);
        Ok(())
    }
}
