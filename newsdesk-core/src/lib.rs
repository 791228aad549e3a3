//! Newsdesk Core - Post Storage
//!
//! TigerStyle: one storage contract, interchangeable backends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               Newsdesk Core                  │
//! ├─────────────────────────────────────────────┤
//! │  PostStore trait        │ posts / add /     │
//! │                         │ update / delete   │
//! ├─────────────────────────────────────────────┤
//! │  MemoryStore            │ always built      │
//! │  PostgresStore          │ feature postgres  │
//! │  MongoStore             │ feature mongo     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use newsdesk_core::{MemoryStore, Post, PostStore};
//!
//! # tokio_test::block_on(async {
//! let store = MemoryStore::new();
//! let post = Post::new(1, "Hello", "First post", 10, "Alice");
//!
//! store.add_post(&post).await.unwrap();
//! assert_eq!(store.posts().await.unwrap(), vec![post]);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod constants;
pub mod storage;

// Re-export common types
pub use config::{connect, BackendKind, StoreConfig};
pub use constants::*;
pub use storage::{MemoryStore, Post, PostBuilder, PostStore, StorageError, StorageResult};

#[cfg(feature = "postgres")]
pub use storage::PostgresStore;

#[cfg(feature = "mongo")]
pub use storage::MongoStore;
