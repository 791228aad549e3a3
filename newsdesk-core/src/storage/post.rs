//! Post - the stored article
//!
//! TigerStyle: Explicit types, builder pattern.
//!
//! Timestamps are Unix seconds so they survive both engines unchanged.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::POST_UNPUBLISHED_AT;

// =============================================================================
// Post
// =============================================================================

/// A post written by an author.
///
/// The serde field names double as the document shape in MongoDB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Caller-assigned identifier
    pub id: i64,
    /// Headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Referenced author
    pub author_id: i64,
    /// Denormalized author display name
    pub author_name: String,
    /// Creation time (Unix seconds)
    pub created_at: i64,
    /// Publication time (Unix seconds, 0 when unpublished)
    pub published_at: i64,
}

impl Post {
    /// Create an unpublished post stamped with the current time.
    #[must_use]
    pub fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: i64,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            author_id,
            author_name: author_name.into(),
            created_at: Utc::now().timestamp(),
            published_at: POST_UNPUBLISHED_AT,
        }
    }

    /// Create a builder for setting every field explicitly.
    #[must_use]
    pub fn builder(id: i64) -> PostBuilder {
        PostBuilder::new(id)
    }

    /// Whether the post has a publication time.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.published_at != POST_UNPUBLISHED_AT
    }

    /// Creation time as a UTC datetime.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.created_at, 0).single()
    }

    /// Publication time as a UTC datetime, `None` when unpublished.
    #[must_use]
    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        if !self.is_published() {
            return None;
        }
        Utc.timestamp_opt(self.published_at, 0).single()
    }

    /// Mark the post published at the given time.
    pub fn publish(&mut self, at: DateTime<Utc>) {
        self.published_at = at.timestamp();
    }
}

// =============================================================================
// Post Builder
// =============================================================================

/// Builder for Post with fluent API.
#[derive(Debug)]
pub struct PostBuilder {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    author_name: String,
    created_at: Option<i64>,
    published_at: i64,
}

impl PostBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
            author_id: 0,
            author_name: String::new(),
            created_at: None,
            published_at: POST_UNPUBLISHED_AT,
        }
    }

    /// Set title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set content.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set author id and display name.
    #[must_use]
    pub fn author(mut self, author_id: i64, author_name: impl Into<String>) -> Self {
        self.author_id = author_id;
        self.author_name = author_name.into();
        self
    }

    /// Set creation time in Unix seconds.
    #[must_use]
    pub fn created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set publication time in Unix seconds.
    #[must_use]
    pub fn published_at(mut self, published_at: i64) -> Self {
        self.published_at = published_at;
        self
    }

    /// Set publication time from a UTC datetime.
    #[must_use]
    pub fn published(mut self, at: DateTime<Utc>) -> Self {
        self.published_at = at.timestamp();
        self
    }

    /// Build the post. Creation time defaults to now.
    #[must_use]
    pub fn build(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            author_id: self.author_id,
            author_name: self.author_name,
            created_at: self.created_at.unwrap_or_else(|| Utc::now().timestamp()),
            published_at: self.published_at,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_new_is_unpublished() {
        let before = Utc::now().timestamp();
        let post = Post::new(1, "A", "B", 10, "Alice");

        assert_eq!(post.id, 1);
        assert_eq!(post.title, "A");
        assert_eq!(post.author_name, "Alice");
        assert!(post.created_at >= before);
        assert!(!post.is_published());
        assert_eq!(post.published_at_utc(), None);
    }

    #[test]
    fn test_post_builder() {
        let post = Post::builder(7)
            .title("Effective Rust")
            .content("Ownership first")
            .author(3, "Bob")
            .created_at(1_700_000_000)
            .published_at(1_700_000_600)
            .build();

        assert_eq!(post.id, 7);
        assert_eq!(post.author_id, 3);
        assert_eq!(post.created_at, 1_700_000_000);
        assert!(post.is_published());
        assert_eq!(
            post.published_at_utc().map(|t| t.timestamp()),
            Some(1_700_000_600)
        );
    }

    #[test]
    fn test_post_publish() {
        let mut post = Post::new(1, "A", "B", 10, "Alice");
        let at = Utc.timestamp_opt(1_650_000_000, 0).unwrap();

        post.publish(at);

        assert_eq!(post.published_at, 1_650_000_000);
        assert_eq!(post.published_at_utc(), Some(at));
    }

    #[test]
    fn test_post_wire_field_names() {
        let post = Post::builder(1)
            .title("A")
            .content("B")
            .author(10, "Alice")
            .created_at(5)
            .build();

        let value = serde_json::to_value(&post).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();

        assert_eq!(
            keys,
            vec![
                "author_id",
                "author_name",
                "content",
                "created_at",
                "id",
                "published_at",
                "title"
            ]
        );
    }
}
