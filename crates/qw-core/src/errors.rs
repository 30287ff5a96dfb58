//! Cross-cutting error types for quizwright.
//!
//! Domain-specific errors (e.g., `StoreError`, `RepairError`) are defined in
//! their respective crates. Everything converges into `anyhow` in `qw-cli`.

use thiserror::Error;

/// Errors that can be raised by any quizwright crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A record is structurally unusable (missing fields, bad option count, etc.).
    #[error("Malformed {entity_type} {id}: {reason}")]
    Malformed {
        entity_type: String,
        id: String,
        reason: String,
    },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
