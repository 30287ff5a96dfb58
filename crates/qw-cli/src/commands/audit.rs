use std::path::PathBuf;

use anyhow::Context;
use qw_audit::{
    AuditArtifacts, AuditReport, AuditSettings, Auditor, LessonState, Rollup, next_step,
    write_artifacts,
};
use qw_core::FindingCode;
use qw_oracle::ScriptIntegrityOracle;
use qw_repair::{RetryPolicy, RunStatus};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct AuditResponse<'a> {
    status: RunStatus,
    oracle_version: &'a str,
    totals: &'a Rollup,
    artifacts: &'a AuditArtifacts,
}

#[derive(Debug, Serialize)]
struct AuditRow<'a> {
    family: &'a str,
    course: &'a str,
    day: u32,
    lesson: &'a str,
    state: LessonState,
    codes: &'a [FindingCode],
    next: String,
}

fn attention_rows(report: &AuditReport) -> Vec<AuditRow<'_>> {
    report
        .lessons()
        .filter(|(_, _, lesson)| lesson.state.needs_attention())
        .map(|(family, course, lesson)| AuditRow {
            family: &family.family_id,
            course: &course.course_id,
            day: lesson.day_number,
            lesson: &lesson.lesson_id,
            state: lesson.state,
            codes: &lesson.codes,
            next: next_step(&course.course_id, lesson),
        })
        .collect()
}

/// Handle `qw audit`.
pub async fn handle(
    args: &AuditArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<RunStatus> {
    let (report, artifacts) = run(args, ctx).await?;
    let response = AuditResponse {
        status: report.status(),
        oracle_version: &report.oracle_version,
        totals: &report.totals,
        artifacts: &artifacts,
    };
    output(&response, &attention_rows(&report), flags.format)?;
    Ok(report.status())
}

pub async fn run(
    args: &AuditArgs,
    ctx: &AppContext,
) -> anyhow::Result<(AuditReport, AuditArtifacts)> {
    let config = &ctx.config.audit;
    let mut settings = AuditSettings::from(config);
    settings.family.clone_from(&args.family);
    settings.include_inactive |= args.include_inactive;
    if let Some(score) = args.min_lesson_score {
        settings.min_lesson_score = score;
    }
    let out_dir = PathBuf::from(args.out_dir.as_deref().unwrap_or(&config.out_dir));
    let tasklist_dir = PathBuf::from(
        args.tasklist_dir
            .as_deref()
            .unwrap_or(&config.tasklist_dir),
    );

    let progress = Progress::spinner("auditing lessons");
    let auditor = Auditor::new(&ctx.db, &ctx.generator, &ctx.oracle)
        .with_language_oracle(ScriptIntegrityOracle::new(config.script_ratio))
        .with_policy(RetryPolicy::from(&ctx.config.repair))
        .with_quota(ctx.config.quota.target())
        .with_settings(settings);
    let report = match auditor.run().await {
        Ok(report) => report,
        Err(error) => {
            progress.finish_err("audit aborted");
            return Err(error).context("audit aborted");
        }
    };
    progress.finish_clear();

    let artifacts = write_artifacts(&report, &out_dir, &tasklist_dir)
        .context("failed to write audit artifacts")?;
    Ok((report, artifacts))
}
