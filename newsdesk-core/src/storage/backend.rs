//! `PostStore` - the storage contract
//!
//! TigerStyle: every backend answers the same four calls the same way.

use async_trait::async_trait;

use super::error::StorageResult;
use super::post::Post;

/// Storage contract shared by every backend.
///
/// - `posts` returns every post ordered by ascending `id`.
/// - `add_post` does not check for an existing `id`; a duplicate surfaces as
///   whatever error the engine reports.
/// - `update_post` and `delete_post` fail with
///   [`StorageError::NotFound`](super::StorageError::NotFound) when no post
///   carries the given `id`.
///
/// Each call is its own unit of work: it either completes fully or leaves the
/// store unchanged.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Short backend label for logs.
    fn backend_name(&self) -> &'static str;

    /// List all posts, ascending by id.
    async fn posts(&self) -> StorageResult<Vec<Post>>;

    /// Insert a new post, materializing its author where the backend tracks authors.
    async fn add_post(&self, post: &Post) -> StorageResult<()>;

    /// Replace title, content, author and publication time of the post with `post.id`.
    async fn update_post(&self, post: &Post) -> StorageResult<()>;

    /// Remove the post with `post.id`.
    async fn delete_post(&self, post: &Post) -> StorageResult<()>;
}
