//! MemoryStore - In-Process Storage
//!
//! TigerStyle: the relational semantics without a database, for tests and tooling.
//!
//! Posts and authors live in two ordered maps behind one lock. Authors are
//! materialized the first time a post references them, and listing resolves
//! each post's author name from the author table the way the SQL join does.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::backend::PostStore;
use super::error::{StorageError, StorageResult};
use super::post::Post;

#[derive(Debug, Default)]
struct Tables {
    posts: BTreeMap<i64, Post>,
    authors: BTreeMap<i64, String>,
}

impl Tables {
    fn ensure_author(&mut self, author_id: i64, author_name: &str) {
        self.authors.entry(author_id).or_insert_with(|| {
            tracing::debug!(author_id, author_name, "materialized author");
            author_name.to_string()
        });
    }
}

/// In-memory post store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the author table, ascending by id.
    pub async fn authors(&self) -> Vec<(i64, String)> {
        let tables = self.tables.read().await;
        tables
            .authors
            .iter()
            .map(|(id, name)| (*id, name.clone()))
            .collect()
    }

    /// Remove every post and author.
    pub async fn clear(&self) {
        let mut tables = self.tables.write().await;
        tables.posts.clear();
        tables.authors.clear();
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn posts(&self) -> StorageResult<Vec<Post>> {
        let tables = self.tables.read().await;

        let posts: Vec<Post> = tables
            .posts
            .values()
            .map(|post| {
                let mut post = post.clone();
                if let Some(name) = tables.authors.get(&post.author_id) {
                    post.author_name.clone_from(name);
                }
                post
            })
            .collect();

        // Postcondition
        debug_assert!(
            posts.windows(2).all(|w| w[0].id < w[1].id),
            "posts must be ordered by id"
        );

        tracing::debug!(count = posts.len(), "listed posts");
        Ok(posts)
    }

    async fn add_post(&self, post: &Post) -> StorageResult<()> {
        let mut tables = self.tables.write().await;

        if tables.posts.contains_key(&post.id) {
            return Err(StorageError::write(format!(
                "duplicate key: post {} already exists",
                post.id
            )));
        }

        tables.ensure_author(post.author_id, &post.author_name);
        tables.posts.insert(post.id, post.clone());

        tracing::debug!(post_id = post.id, author_id = post.author_id, "added post");
        Ok(())
    }

    async fn update_post(&self, post: &Post) -> StorageResult<()> {
        let mut tables = self.tables.write().await;

        if !tables.posts.contains_key(&post.id) {
            tracing::warn!(post_id = post.id, "update matched no post");
            return Err(StorageError::not_found(post.id));
        }

        tables.ensure_author(post.author_id, &post.author_name);
        if let Some(stored) = tables.posts.get_mut(&post.id) {
            stored.title.clone_from(&post.title);
            stored.content.clone_from(&post.content);
            stored.author_id = post.author_id;
            stored.author_name.clone_from(&post.author_name);
            stored.published_at = post.published_at;
        }

        tracing::debug!(post_id = post.id, "updated post");
        Ok(())
    }

    async fn delete_post(&self, post: &Post) -> StorageResult<()> {
        let mut tables = self.tables.write().await;

        if tables.posts.remove(&post.id).is_none() {
            tracing::warn!(post_id = post.id, "delete matched no post");
            return Err(StorageError::not_found(post.id));
        }

        tracing::debug!(post_id = post.id, "deleted post");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
