//! Post administration: cached index with client-side search, drafts and saving

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::BlogClient;
use crate::content::post::string_or_vec;
use crate::content::{Post, PostId, PostStatus};
use crate::error::{ApiError, FolioError, Result};
use crate::submission::SubmissionState;

/// Last fetched list of posts, filtered locally without another round trip
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
}

impl PostIndex {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn load(client: &BlogClient) -> Result<Self, ApiError> {
        Ok(Self::new(client.list_all()?))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts whose title, author, tags or slug contain `query`, case-insensitively.
    /// A blank query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Post> {
        let query = query.trim().to_lowercase();
        self.posts
            .iter()
            .filter(|p| search_text(p).contains(&query))
            .collect()
    }

    pub fn find(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id.as_ref() == Some(id))
    }
}

fn search_text(post: &Post) -> String {
    [
        post.title.as_deref().unwrap_or(""),
        post.author.as_deref().unwrap_or(""),
        &post.tags.join(" "),
        post.slug.as_deref().unwrap_or(""),
    ]
    .join(" ")
    .to_lowercase()
}

/// Editable form state of a post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDraft {
    /// Present when editing an existing post
    pub id: Option<PostId>,
    pub title: String,
    pub slug: String,
    pub author: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub excerpt: String,
    pub content: String,
    pub featured_image_url: String,
}

impl PostDraft {
    /// Pre-fill a draft from an existing post
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone().unwrap_or_default(),
            slug: post.slug.clone().unwrap_or_default(),
            author: post.author.clone().unwrap_or_default(),
            tags: post.tags.clone(),
            excerpt: post.excerpt.clone().unwrap_or_default(),
            content: post.content.clone().unwrap_or_default(),
            featured_image_url: post.featured_image_url.clone().unwrap_or_default(),
        }
    }

    /// Build the request body. Title and content are required; a blank
    /// author falls back to `default_author` and a blank slug is derived
    /// from the title.
    ///
    /// Every save publishes: status is `PUBLISHED`, the post is featured,
    /// the view counter restarts at zero and all timestamps are `now`.
    pub fn to_payload(&self, default_author: &str, now: DateTime<Utc>) -> Result<PostPayload> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FolioError::MissingField("title"));
        }
        if self.content.trim().is_empty() {
            return Err(FolioError::MissingField("content"));
        }

        let author = match self.author.trim() {
            "" => default_author.to_string(),
            a => a.to_string(),
        };
        let slug = match self.slug.trim() {
            "" => slug::slugify(title),
            s => s.to_string(),
        };
        let now_iso = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        Ok(PostPayload {
            id: self.id.clone(),
            title: title.to_string(),
            content: self.content.clone(),
            excerpt: self.excerpt.trim().to_string(),
            author,
            featured_image_url: self.featured_image_url.trim().to_string(),
            slug,
            status: PostStatus::Published,
            tags: self.tags.clone(),
            view_count: 0,
            is_featured: true,
            created_at: now_iso.clone(),
            updated_at: now_iso.clone(),
            published_at: now_iso,
        })
    }
}

/// Create/update request body
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub featured_image_url: String,
    pub slug: String,
    pub status: PostStatus,
    pub tags: Vec<String>,
    pub view_count: u64,
    pub is_featured: bool,
    pub created_at: String,
    pub updated_at: String,
    pub published_at: String,
}

/// Admin workflow over the API: a cached index plus guarded saves
pub struct AdminSession {
    client: BlogClient,
    index: PostIndex,
    state: SubmissionState,
    default_author: String,
}

impl AdminSession {
    pub fn new(client: BlogClient, default_author: impl Into<String>) -> Self {
        Self {
            client,
            index: PostIndex::default(),
            state: SubmissionState::Idle,
            default_author: default_author.into(),
        }
    }

    pub fn index(&self) -> &PostIndex {
        &self.index
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Reload the cached index
    pub fn refresh(&mut self) -> Result<()> {
        self.index = PostIndex::load(&self.client)?;
        Ok(())
    }

    pub fn search(&self, query: &str) -> Vec<&Post> {
        self.index.filter(query)
    }

    /// Fetch a post and turn it into an editable draft
    pub fn edit(&self, id: &PostId) -> Result<PostDraft> {
        Ok(PostDraft::from_post(&self.client.get(id)?))
    }

    /// Create or update depending on whether the draft has an id, then refresh
    pub fn save(&mut self, draft: &PostDraft, now: DateTime<Utc>) -> Result<Post> {
        let client = &self.client;
        let default_author = &self.default_author;
        let saved = self.state.run(|| {
            let payload = draft.to_payload(default_author, now)?;
            let post = match &draft.id {
                Some(id) => client.update(id, &payload)?,
                None => client.create(&payload)?,
            };
            Ok(post)
        })?;
        self.refresh()?;
        Ok(saved)
    }

    pub fn delete(&mut self, id: &PostId) -> Result<()> {
        let client = &self.client;
        self.state.run(|| Ok(client.delete(id)?))?;
        info!("Post {} removed, refreshing index", id);
        self.refresh()
    }
}
