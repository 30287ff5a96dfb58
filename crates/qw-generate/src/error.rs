//! Generator error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading question banks. Generation itself never fails.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A bank directory or file could not be read.
    #[error("failed to read question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bank file is not valid TOML for the bank schema.
    #[error("failed to parse question bank {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A bank parsed but breaks a content rule.
    #[error("invalid question bank {name}: {reason}")]
    InvalidBank { name: String, reason: String },
}
