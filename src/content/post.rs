//! Post and listing models as served by the blog API

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Tags arrive either as a JSON list or as one comma-separated string
pub(crate) fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(split_tags(value))
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<Option<String>>()? {
                if let Some(item) = item {
                    vec.push(item);
                }
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Listing pages may contain `null` holes; drop them
fn skip_nulls<'de, D>(deserializer: D) -> Result<Vec<Post>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Option<Post>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

/// Split a comma-separated tag string, trimming and dropping blanks
pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Post identifier; the API uses numbers but strings are accepted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Int(i64),
    Str(String),
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Int(n) => write!(f, "{}", n),
            PostId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for PostId {
    fn from(n: i64) -> Self {
        PostId::Int(n)
    }
}

impl From<&str> for PostId {
    fn from(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) => PostId::Int(n),
            Err(_) => PostId::Str(s.to_string()),
        }
    }
}

/// Publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Draft,
    #[default]
    Published,
    Archived,
}

/// A blog post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    pub id: Option<PostId>,

    pub title: Option<String>,

    /// URL-friendly name, unique per post
    pub slug: Option<String>,

    pub author: Option<String>,

    /// Short summary
    pub excerpt: Option<String>,

    /// Raw body in the markdown subset
    pub content: Option<String>,

    pub status: Option<PostStatus>,

    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,

    pub is_featured: bool,

    pub featured_image_url: Option<String>,

    /// Incremented by the server on every detail view
    pub view_count: u64,

    // ISO-8601 strings, parsed lazily by the date helpers
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub published_at: Option<String>,
}

impl Post {
    pub fn title_or_default(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or("Untitled")
    }

    pub fn excerpt_or_default(&self) -> &str {
        non_blank(self.excerpt.as_deref()).unwrap_or("No excerpt available.")
    }

    pub fn slug_or_default(&self) -> &str {
        self.slug.as_deref().unwrap_or("")
    }

    /// Body text used for read-time estimation: content, else excerpt
    pub fn reading_text(&self) -> Option<&str> {
        non_blank(self.content.as_deref()).or_else(|| non_blank(self.excerpt.as_deref()))
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// One page of a paginated listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageEnvelope {
    #[serde(deserialize_with = "skip_nulls")]
    pub content: Vec<Post>,

    /// Zero-based page index
    pub number: usize,

    pub total_pages: usize,
}

impl PageEnvelope {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Aggregate counters from `/blogs/stats`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogStats {
    pub total_blogs: u64,
    pub total_views: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post() {
        let json = r#"{
            "id": 7,
            "title": "Spring Boot Tips",
            "slug": "spring-boot-tips",
            "author": "Jane",
            "content": "Hello",
            "status": "PUBLISHED",
            "tags": ["java", "spring"],
            "isFeatured": true,
            "viewCount": 42,
            "publishedAt": "2024-01-15T10:30:00"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, Some(PostId::Int(7)));
        assert_eq!(post.status, Some(PostStatus::Published));
        assert_eq!(post.tags, vec!["java", "spring"]);
        assert!(post.is_featured);
        assert_eq!(post.view_count, 42);
        assert_eq!(post.published_at.as_deref(), Some("2024-01-15T10:30:00"));
    }

    #[test]
    fn test_tags_as_string() {
        let post: Post = serde_json::from_str(r#"{"tags": "rust, web ,,cli"}"#).unwrap();
        assert_eq!(post.tags, vec!["rust", "web", "cli"]);

        let post: Post = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let post: Post = serde_json::from_str("{}").unwrap();
        assert_eq!(post.title_or_default(), "Untitled");
        assert_eq!(post.excerpt_or_default(), "No excerpt available.");
        assert_eq!(post.slug_or_default(), "");
        assert_eq!(post.reading_text(), None);
        assert!(!post.is_featured);
    }

    #[test]
    fn test_reading_text_prefers_content() {
        let post = Post {
            excerpt: Some("short".to_string()),
            content: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(post.reading_text(), Some("short"));
    }

    #[test]
    fn test_string_id() {
        let post: Post = serde_json::from_str(r#"{"id": "abc-1"}"#).unwrap();
        assert_eq!(post.id, Some(PostId::Str("abc-1".to_string())));
        assert_eq!(PostId::from("12"), PostId::Int(12));
        assert_eq!(PostId::from("x12").to_string(), "x12");
    }

    #[test]
    fn test_page_envelope_skips_nulls() {
        let json = r#"{
            "content": [{"title": "A"}, null, {"title": "B"}],
            "number": 1,
            "totalPages": 4,
            "totalElements": 20
        }"#;
        let page: PageEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn test_stats() {
        let stats: BlogStats =
            serde_json::from_str(r#"{"totalBlogs": 12, "totalViews": 3400}"#).unwrap();
        assert_eq!(stats.total_blogs, 12);
        assert_eq!(stats.total_views, 3400);
    }
}
