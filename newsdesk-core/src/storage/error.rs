//! Storage errors
//!
//! TigerStyle: one error enum for every backend, driver messages kept verbatim.

/// Result alias used by every store operation.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors returned by a [`PostStore`](super::PostStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Could not reach or open the database
    #[error("connection error: {0}")]
    Connection(String),

    /// The engine failed a read
    #[error("read error: {0}")]
    Read(String),

    /// The engine failed a write
    #[error("write error: {0}")]
    Write(String),

    /// An update or delete matched no post
    #[error("post {id} not found")]
    NotFound {
        /// Id that matched nothing
        id: i64,
    },

    /// Stored data could not be mapped onto a post
    #[error("decode error: {0}")]
    Decode(String),

    /// Invalid store configuration
    #[error("config error: {0}")]
    Config(String),
}

impl StorageError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a read error.
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Create a write error.
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Create a not-found error for a post id.
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error reports a missing post.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
