use anyhow::Context;
use qw_core::FindingCode;
use qw_repair::{
    BackupWriter, LessonOutcome, LessonStatus, RepairEngine, RepairOptions, RetryPolicy, RunStatus,
    RunSummary,
};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RepairArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct RepairRow<'a> {
    day: u32,
    lesson: &'a str,
    status: LessonStatus,
    before: usize,
    after: usize,
    replaced: usize,
    filled: usize,
    removed: usize,
    calls: usize,
    committed: bool,
    codes: &'a [FindingCode],
}

impl<'a> From<&'a LessonOutcome> for RepairRow<'a> {
    fn from(o: &'a LessonOutcome) -> Self {
        Self {
            day: o.day_number,
            lesson: &o.lesson_id,
            status: o.status,
            before: o.before.total(),
            after: o.after.total(),
            replaced: o.plan.replaced(),
            filled: o.plan.filled(),
            removed: o.plan.removals.len(),
            calls: o.generator_calls,
            committed: o.committed,
            codes: &o.codes,
        }
    }
}

/// Handle `qw repair`.
pub async fn handle(
    args: &RepairArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<RunStatus> {
    let summary = run(args, ctx).await?;
    let rows: Vec<RepairRow<'_>> = summary.lessons.iter().map(RepairRow::from).collect();
    output(&summary, &rows, flags.format)?;
    Ok(summary.status())
}

pub async fn run(args: &RepairArgs, ctx: &AppContext) -> anyhow::Result<RunSummary> {
    let backup_dir = args
        .backup_dir
        .clone()
        .unwrap_or_else(|| ctx.config.repair.backup_dir.clone());
    let engine = RepairEngine::new(
        &ctx.db,
        &ctx.generator,
        &ctx.oracle,
        BackupWriter::new(backup_dir),
    )
    .with_policy(RetryPolicy::from(&ctx.config.repair))
    .with_quota(ctx.config.quota.target())
    .with_options(RepairOptions {
        dry_run: args.dry_run,
        force_rewrite: args.force_rewrite,
    });

    let progress = Progress::spinner(&format!("repairing {}", args.course));
    match engine.repair_course(&args.course, args.day).await {
        Ok(summary) => {
            progress.finish_clear();
            tracing::info!(
                course = %summary.course_id,
                compliant = summary.compliant(),
                non_compliant = summary.non_compliant(),
                dry_run = summary.dry_run,
                "repair finished"
            );
            Ok(summary)
        }
        Err(error) => {
            progress.finish_err("repair aborted");
            Err(error).with_context(|| format!("repair of course '{}' aborted", args.course))
        }
    }
}
