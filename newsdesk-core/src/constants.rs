//! Constants
//!
//! TigerStyle: named limits and defaults, units in the name.

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable selecting the storage backend
pub const ENV_BACKEND: &str = "NEWSDESK_BACKEND";

/// Environment variable holding the database connection string
pub const ENV_DATABASE_URL: &str = "NEWSDESK_DATABASE_URL";

// =============================================================================
// PostgreSQL
// =============================================================================

/// Maximum connections held by the PostgreSQL pool
pub const POSTGRES_POOL_CONNECTIONS_MAX: u32 = 10;

/// Accepted PostgreSQL URL schemes
pub const POSTGRES_URL_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

// =============================================================================
// MongoDB
// =============================================================================

/// Database used when the MongoDB URI names none
pub const MONGO_DATABASE_DEFAULT: &str = "newsdesk";

/// Collection holding post documents
pub const MONGO_POSTS_COLLECTION: &str = "posts";

/// Accepted MongoDB URI schemes
pub const MONGO_URL_SCHEMES: &[&str] = &["mongodb://", "mongodb+srv://"];

// =============================================================================
// Posts
// =============================================================================

/// `published_at` value of a post that has not been published
pub const POST_UNPUBLISHED_AT: i64 = 0;
