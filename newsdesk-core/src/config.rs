//! Store configuration
//!
//! TigerStyle: backend choice and connection string, validated before connecting.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::constants::{ENV_BACKEND, ENV_DATABASE_URL, MONGO_URL_SCHEMES, POSTGRES_URL_SCHEMES};
use crate::storage::{MemoryStore, PostStore, StorageError, StorageResult};

// =============================================================================
// Backend Kind
// =============================================================================

/// Storage backends a store can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BackendKind {
    /// In-process maps
    #[default]
    Memory,
    /// PostgreSQL (`posts` + `authors` tables)
    Postgres,
    /// MongoDB (`posts` collection)
    Mongo,
}

impl BackendKind {
    /// Get string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
            Self::Mongo => "mongo",
        }
    }

    /// URL schemes accepted for this backend. Empty for memory.
    #[must_use]
    pub fn url_schemes(&self) -> &'static [&'static str] {
        match self {
            Self::Memory => &[],
            Self::Postgres => POSTGRES_URL_SCHEMES,
            Self::Mongo => MONGO_URL_SCHEMES,
        }
    }
}

impl FromStr for BackendKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mongo" | "mongodb" => Ok(Self::Mongo),
            other => Err(StorageError::config(format!("unknown backend: {other}"))),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Store Config
// =============================================================================

/// Which backend to build and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreConfig {
    /// Backend to construct
    pub backend: BackendKind,
    /// Connection string, unused by the memory backend
    pub url: Option<String>,
}

impl StoreConfig {
    /// Create a config.
    #[must_use]
    pub fn new(backend: BackendKind, url: Option<String>) -> Self {
        Self { backend, url }
    }

    /// Read `NEWSDESK_BACKEND` and `NEWSDESK_DATABASE_URL`.
    ///
    /// # Errors
    /// Returns error if the backend name is unknown or the result fails validation.
    pub fn from_env() -> StorageResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> StorageResult<Self> {
        let backend = match lookup(ENV_BACKEND) {
            Some(name) => name.parse()?,
            None => BackendKind::default(),
        };
        let url = lookup(ENV_DATABASE_URL).filter(|url| !url.is_empty());

        let config = Self { backend, url };
        config.validate()?;
        Ok(config)
    }

    /// Check that database backends have a URL with a matching scheme.
    ///
    /// # Errors
    /// Returns a config error describing the first problem found.
    pub fn validate(&self) -> StorageResult<()> {
        let schemes = self.backend.url_schemes();
        if schemes.is_empty() {
            return Ok(());
        }

        let url = self.url.as_deref().ok_or_else(|| {
            StorageError::config(format!(
                "{} backend needs {ENV_DATABASE_URL}",
                self.backend
            ))
        })?;

        if !schemes.iter().any(|scheme| url.starts_with(scheme)) {
            return Err(StorageError::config(format!(
                "{} backend expects a URL starting with one of {schemes:?}",
                self.backend
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Construction
// =============================================================================

/// Build the configured store.
///
/// # Errors
/// Returns a config error if validation fails or the backend's cargo feature
/// is disabled, and a connection error if the database is unreachable.
pub async fn connect(config: &StoreConfig) -> StorageResult<Arc<dyn PostStore>> {
    config.validate()?;
    tracing::debug!(backend = %config.backend, "connecting store");

    match config.backend {
        BackendKind::Memory => Ok(Arc::new(MemoryStore::new())),
        BackendKind::Postgres => connect_postgres(config.url.as_deref().unwrap_or_default()).await,
        BackendKind::Mongo => connect_mongo(config.url.as_deref().unwrap_or_default()).await,
    }
}

#[cfg(feature = "postgres")]
async fn connect_postgres(url: &str) -> StorageResult<Arc<dyn PostStore>> {
    Ok(Arc::new(crate::storage::PostgresStore::new(url).await?))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(_url: &str) -> StorageResult<Arc<dyn PostStore>> {
    Err(StorageError::config("built without the postgres feature"))
}

#[cfg(feature = "mongo")]
async fn connect_mongo(url: &str) -> StorageResult<Arc<dyn PostStore>> {
    Ok(Arc::new(crate::storage::MongoStore::new(url).await?))
}

#[cfg(not(feature = "mongo"))]
async fn connect_mongo(_url: &str) -> StorageResult<Arc<dyn PostStore>> {
    Err(StorageError::config("built without the mongo feature"))
}

// =============================================================================
// Tests
// =============================================================================
