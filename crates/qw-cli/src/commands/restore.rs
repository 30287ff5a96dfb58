use std::path::Path;

use anyhow::Context;
use qw_repair::{BackupArtifact, BackupWriter, RestoreOutcome, RunStatus, restore};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RestoreArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `qw restore`.
pub async fn handle(
    args: &RestoreArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<RunStatus> {
    let outcome = run(args, ctx).await?;
    output(&outcome, std::slice::from_ref(&outcome), flags.format)?;
    Ok(RunStatus::Success)
}

pub async fn run(args: &RestoreArgs, ctx: &AppContext) -> anyhow::Result<RestoreOutcome> {
    let artifact = BackupArtifact::read(Path::new(&args.backup))
        .with_context(|| format!("failed to read backup {}", args.backup))?;
    let backup_dir = args
        .backup_dir
        .clone()
        .unwrap_or_else(|| ctx.config.repair.backup_dir.clone());
    restore(
        &ctx.db,
        &BackupWriter::new(backup_dir),
        &artifact,
        args.dry_run,
    )
    .await
    .with_context(|| {
        format!(
            "restore of lesson '{}' in course '{}' failed",
            artifact.lesson_id, artifact.course_id
        )
    })
}
