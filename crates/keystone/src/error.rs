//! Error types for Keystone operations.
//!
//! All fallible operations return [`Result`]. Catalog failures propagate
//! unchanged through the graph traversal: the core performs no retries,
//! so callers see the underlying storage error as-is.

use thiserror::Error;

/// Result type for Keystone operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for Keystone operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Catalog storage operation failed
    #[error("catalog error: {0}")]
    Catalog(#[from] rusqlite::Error),

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A schema object could not be found in the catalog
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid arguments (e.g. a foreign key with no referent)
    #[error("invalid argument: {0}")]
    Config(String),

    /// Internal invariant violation (lock poisoning, corrupt catalog rows)
    #[error("internal error: {0}")]
    Internal(String),
}
