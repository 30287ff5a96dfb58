//! Storage error types for qw-store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from catalog and question-pool storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A catalog entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Stored data cannot be turned into a valid entity.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A catalog seed file could not be read.
    #[error("Failed to read seed {path}: {source}")]
    SeedIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A catalog seed file is malformed.
    #[error("Invalid seed {path}: {reason}")]
    Seed { path: PathBuf, reason: String },

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
