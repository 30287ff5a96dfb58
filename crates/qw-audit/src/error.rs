//! Audit error types.

use std::path::PathBuf;

use qw_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The persistence gateway failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// `--family` named a family that is neither known nor `unassigned`.
    #[error("Unknown family: {0}")]
    UnknownFamily(String),

    /// A report or checklist artifact could not be written.
    #[error("Failed to write artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The report could not be serialized.
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
