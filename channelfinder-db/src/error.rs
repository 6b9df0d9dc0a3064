//! Error types for catalog connection management.

use thiserror::Error;

/// Result type for catalog operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur while opening or preparing a catalog.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error (reading a configuration file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DbError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
