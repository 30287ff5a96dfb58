//! Write-once pre-mutation snapshots.
//!
//! Layout: `<root>/<course>/<lesson>-<timestamp>.json`. Files are opened with
//! `create_new`; an existing file is never overwritten.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use qw_core::PersistedQuestion;
use qw_store::LessonScope;
use serde::{Deserialize, Serialize};

use crate::error::RepairError;

pub const BACKUP_FORMAT_VERSION: u32 = 1;

/// Snapshot of one lesson's active questions taken before a run mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupArtifact {
    pub format_version: u32,
    pub course_id: String,
    pub lesson_id: String,
    pub course_specific: bool,
    pub day_number: u32,
    pub created_at: DateTime<Utc>,
    /// Whether the run that took the snapshot was a dry run.
    pub dry_run: bool,
    pub questions: Vec<PersistedQuestion>,
}

impl BackupArtifact {
    #[must_use]
    pub fn new(
        scope: &LessonScope,
        day_number: u32,
        questions: Vec<PersistedQuestion>,
        dry_run: bool,
    ) -> Self {
        Self {
            format_version: BACKUP_FORMAT_VERSION,
            course_id: scope.course_id.clone(),
            lesson_id: scope.lesson_id.clone(),
            course_specific: scope.course_specific,
            day_number,
            created_at: Utc::now(),
            dry_run,
            questions,
        }
    }

    #[must_use]
    pub fn scope(&self) -> LessonScope {
        LessonScope {
            course_id: self.course_id.clone(),
            lesson_id: self.lesson_id.clone(),
            course_specific: self.course_specific,
        }
    }

    /// # Errors
    ///
    /// Returns `RepairError::BackupIo` if the file cannot be read and
    /// `RepairError::BackupFormat` if it is not a backup artifact.
    pub fn read(path: &Path) -> Result<Self, RepairError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RepairError::BackupIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| RepairError::BackupFormat {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Writes [`BackupArtifact`]s under a root directory.
#[derive(Debug, Clone)]
pub struct BackupWriter {
    root: PathBuf,
}

impl BackupWriter {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `artifact` and return its path.
    ///
    /// Two snapshots of the same lesson in the same millisecond get a numeric
    /// suffix rather than replacing one another.
    ///
    /// # Errors
    ///
    /// Returns `RepairError::BackupIo` if the directory or file cannot be created.
    pub fn write(&self, artifact: &BackupArtifact) -> Result<PathBuf, RepairError> {
        let dir = self.root.join(path_safe(&artifact.course_id));
        std::fs::create_dir_all(&dir).map_err(|source| RepairError::BackupIo {
            path: dir.clone(),
            source,
        })?;
        let body = serde_json::to_vec_pretty(artifact).map_err(|source| {
            RepairError::BackupFormat {
                path: dir.clone(),
                source,
            }
        })?;

        let stem = format!(
            "{}-{}",
            path_safe(&artifact.lesson_id),
            artifact.created_at.format("%Y%m%dT%H%M%S%.3fZ")
        );
        let mut suffix = 0u32;
        loop {
            let name = if suffix == 0 {
                format!("{stem}.json")
            } else {
                format!("{stem}-{suffix}.json")
            };
            let path = dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(&body)
                        .and_then(|()| file.sync_all())
                        .map_err(|source| RepairError::BackupIo {
                            path: path.clone(),
                            source,
                        })?;
                    tracing::debug!(
                        path = %path.display(),
                        questions = artifact.questions.len(),
                        "backup written"
                    );
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => suffix += 1,
                Err(source) => return Err(RepairError::BackupIo { path, source }),
            }
        }
    }
}

fn path_safe(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn artifact() -> BackupArtifact {
        BackupArtifact::new(&LessonScope::new("course/a", "lesson 1"), 3, Vec::new(), true)
    }

    #[test]
    fn writes_under_course_directory_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let writer = BackupWriter::new(dir.path());
        let a = artifact();
        let path = writer.write(&a).unwrap();

        assert!(path.starts_with(dir.path().join("course_a")));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("lesson_1-"), "{name}");
        assert_eq!(BackupArtifact::read(&path).unwrap(), a);
    }

    #[test]
    fn same_instant_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = BackupWriter::new(dir.path());
        let a = artifact();
        let first = writer.write(&a).unwrap();
        let second = writer.write(&a).unwrap();
        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
    }

    #[test]
    fn garbage_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"not\": \"a backup\"}").unwrap();
        assert!(matches!(
            BackupArtifact::read(&path),
            Err(RepairError::BackupFormat { .. })
        ));
    }
}
