//! MongoStore - Document Storage
//!
//! TigerStyle: one collection, one document per post, client kept for the store's lifetime.
//!
//! # Document Shape
//!
//! ```text
//! { _id, id, title, content, author_id, author_name, created_at, published_at }
//! ```
//!
//! `_id` is assigned by the server and ignored on read; `id` is the post id
//! used for every filter.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection};

use super::backend::PostStore;
use super::error::{StorageError, StorageResult};
use super::post::Post;
use crate::constants::{MONGO_DATABASE_DEFAULT, MONGO_POSTS_COLLECTION, MONGO_URL_SCHEMES};

// =============================================================================
// MongoStore
// =============================================================================

/// MongoDB post store.
pub struct MongoStore {
    client: Client,
    posts: Collection<Document>,
}

impl MongoStore {
    /// Connect using the database named in the URI, or `newsdesk` when it names none.
    ///
    /// The server is pinged before the store is returned.
    ///
    /// # Errors
    /// Returns [`StorageError::Config`] if the string is not a mongodb URI, and
    /// [`StorageError::Connection`] if it fails to parse or the server does not
    /// answer the ping.
    pub async fn new(connection_string: &str) -> StorageResult<Self> {
        Self::connect(connection_string, None).await
    }

    /// Connect and use the given database.
    ///
    /// # Errors
    /// Returns [`StorageError::Config`] if the string is not a mongodb URI, and
    /// [`StorageError::Connection`] if it fails to parse or the server does not
    /// answer the ping.
    pub async fn with_database(connection_string: &str, database: &str) -> StorageResult<Self> {
        Self::connect(connection_string, Some(database)).await
    }

    async fn connect(connection_string: &str, database: Option<&str>) -> StorageResult<Self> {
        if !MONGO_URL_SCHEMES
            .iter()
            .any(|scheme| connection_string.starts_with(scheme))
        {
            return Err(StorageError::config(
                "connection string must be a mongodb URI",
            ));
        }

        let options = ClientOptions::parse(connection_string)
            .await
            .map_err(|e| StorageError::connection(format!("invalid mongodb URI: {e}")))?;
        let client = Client::with_options(options)
            .map_err(|e| StorageError::connection(format!("failed to create client: {e}")))?;

        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(MONGO_DATABASE_DEFAULT)),
        };

        database
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| StorageError::connection(format!("ping failed: {e}")))?;

        tracing::info!(database = database.name(), "connected to mongodb");

        let posts = database.collection::<Document>(MONGO_POSTS_COLLECTION);
        Ok(Self { client, posts })
    }

    /// Delete every post document.
    ///
    /// # Errors
    /// Returns error if the delete fails.
    pub async fn clear(&self) -> StorageResult<()> {
        self.posts
            .delete_many(doc! {}, None)
            .await
            .map_err(|e| StorageError::write(format!("failed to clear posts: {e}")))?;
        Ok(())
    }

    /// Shut the client down, waiting for in-flight operations.
    ///
    /// The store must not be used afterwards.
    pub async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}

// =============================================================================
// PostStore Implementation
// =============================================================================

#[async_trait]
impl PostStore for MongoStore {
    fn backend_name(&self) -> &'static str {
        "mongo"
    }

    async fn posts(&self) -> StorageResult<Vec<Post>> {
        let options = FindOptions::builder().sort(doc! { "id": 1 }).build();
        let mut cursor = self
            .posts
            .find(doc! {}, options)
            .await
            .map_err(|e| StorageError::read(format!("failed to list posts: {e}")))?;

        let mut posts = Vec::new();
        while let Some(document) = cursor
            .try_next()
            .await
            .map_err(|e| StorageError::read(format!("cursor failed: {e}")))?
        {
            let post: Post = bson::from_document(document)
                .map_err(|e| StorageError::decode(format!("malformed post document: {e}")))?;
            posts.push(post);
        }

        tracing::debug!(count = posts.len(), "listed posts");
        Ok(posts)
    }

    async fn add_post(&self, post: &Post) -> StorageResult<()> {
        let document = bson::to_document(post)
            .map_err(|e| StorageError::write(format!("failed to encode post: {e}")))?;

        self.posts
            .insert_one(document, None)
            .await
            .map_err(|e| StorageError::write(format!("failed to insert post: {e}")))?;

        tracing::debug!(post_id = post.id, author_id = post.author_id, "added post");
        Ok(())
    }

    async fn update_post(&self, post: &Post) -> StorageResult<()> {
        let update = doc! {
            "$set": {
                "title": post.title.as_str(),
                "content": post.content.as_str(),
                "author_id": post.author_id,
                "author_name": post.author_name.as_str(),
                "published_at": post.published_at,
            }
        };

        let result = self
            .posts
            .update_one(doc! { "id": post.id }, update, None)
            .await
            .map_err(|e| StorageError::write(format!("failed to update post: {e}")))?;

        if result.matched_count == 0 {
            tracing::warn!(post_id = post.id, "update matched no post");
            return Err(StorageError::not_found(post.id));
        }

        tracing::debug!(post_id = post.id, "updated post");
        Ok(())
    }

    async fn delete_post(&self, post: &Post) -> StorageResult<()> {
        let result = self
            .posts
            .delete_one(doc! { "id": post.id }, None)
            .await
            .map_err(|e| StorageError::write(format!("failed to delete post: {e}")))?;

        if result.deleted_count == 0 {
            tracing::warn!(post_id = post.id, "delete matched no post");
            return Err(StorageError::not_found(post.id));
        }

        tracing::debug!(post_id = post.id, "deleted post");
        Ok(())
    }
}

// =============================================================================
// Tests (require running MongoDB)
// =============================================================================
