//! Operator restore of a lesson pool from a backup artifact.

use std::path::PathBuf;

use qw_store::{NewQuestion, QuestionFilter, QuestionGateway};
use serde::Serialize;

use crate::backup::{BackupArtifact, BackupWriter};
use crate::error::RepairError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreOutcome {
    pub course_id: String,
    pub lesson_id: String,
    /// Active questions removed to make room for the snapshot.
    pub removed: usize,
    pub restored: usize,
    pub dry_run: bool,
    pub committed: bool,
    /// Snapshot of the pool as it was before the restore.
    pub backup: PathBuf,
}

/// Put the lesson's active pool back to `artifact`.
///
/// The current pool is itself backed up first. Restored questions keep their
/// display order, text, and usage counters but receive new ids.
///
/// # Errors
///
/// Returns `RepairError` on storage or backup failures.
pub async fn restore<S>(
    store: &S,
    backups: &BackupWriter,
    artifact: &BackupArtifact,
    dry_run: bool,
) -> Result<RestoreOutcome, RepairError>
where
    S: QuestionGateway,
{
    let scope = artifact.scope();
    let current = store.find(&scope, QuestionFilter::Active).await?;
    let backup = backups.write(&BackupArtifact::new(
        &scope,
        artifact.day_number,
        current.clone(),
        dry_run,
    ))?;

    let ids: Vec<i64> = current.iter().map(|q| q.id).collect();
    let items: Vec<NewQuestion> = artifact
        .questions
        .iter()
        .map(NewQuestion::from_persisted)
        .collect();

    let committed = if dry_run {
        false
    } else {
        store.replace(&scope, &ids, &items).await?;
        true
    };
    tracing::info!(
        scope = %scope,
        removed = ids.len(),
        restored = items.len(),
        snapshot_taken = %artifact.created_at.to_rfc3339(),
        committed,
        "lesson restored"
    );

    Ok(RestoreOutcome {
        course_id: scope.course_id,
        lesson_id: scope.lesson_id,
        removed: ids.len(),
        restored: items.len(),
        dry_run,
        committed,
        backup,
    })
}
