//! Repair error types.
//!
//! Only fatal conditions are errors. A lesson that cannot be brought to quota
//! is reported through [`crate::LessonOutcome`], not through `Err`.

use std::path::PathBuf;

use qw_core::CoreError;
use qw_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepairError {
    /// The persistence gateway failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A lesson or course record is unusable.
    #[error("Malformed input: {0}")]
    Malformed(#[from] CoreError),

    /// The requested course (or day) has no lessons to work on.
    #[error("No lessons found for course {course_id}{}", .day.map(|d| format!(" day {d}")).unwrap_or_default())]
    NoLessons { course_id: String, day: Option<u32> },

    /// A backup artifact could not be written or read.
    #[error("Backup I/O failed at {path}: {source}")]
    BackupIo {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A backup artifact is not valid JSON of the expected shape.
    #[error("Invalid backup {path}: {source}")]
    BackupFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
