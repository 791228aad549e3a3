//! Storage - Post Store Trait and Implementations
//!
//! TigerStyle: one contract, every backend held to it by the same tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PostStore Trait                         │
//! └─────────────────────────────────────────────────────────────┘
//!        ↑                     ↑                      ↑
//!        │                     │                      │
//! ┌──────┴──────┐     ┌────────┴────────┐    ┌────────┴────────┐
//! │ MemoryStore │     │  PostgresStore  │    │   MongoStore    │
//! │  (testing)  │     │ (posts+authors) │    │ (posts coll.)   │
//! └─────────────┘     └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Contract
//!
//! Every backend lists posts ascending by id and reports
//! [`StorageError::NotFound`] when an update or delete matches nothing.

mod backend;
mod error;
mod memory;
mod post;

#[cfg(test)]
pub(crate) mod contract;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "mongo")]
mod mongo;

pub use backend::PostStore;
pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use post::{Post, PostBuilder};

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

#[cfg(feature = "mongo")]
pub use mongo::MongoStore;
