use std::path::Path;

use anyhow::Context;
use qw_repair::RunStatus;
use qw_store::{CatalogSeed, CatalogWriter, ImportSummary};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ImportResponse<'a> {
    file: &'a str,
    db: String,
    #[serde(flatten)]
    summary: ImportSummary,
}

/// Handle `qw import`.
pub async fn handle(
    args: &ImportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<RunStatus> {
    let summary = run(args, ctx).await?;
    let response = ImportResponse {
        file: &args.file,
        db: ctx.db_path.display().to_string(),
        summary,
    };
    output(&response, std::slice::from_ref(&summary), flags.format)?;
    Ok(RunStatus::Success)
}

pub async fn run(args: &ImportArgs, ctx: &AppContext) -> anyhow::Result<ImportSummary> {
    let seed = CatalogSeed::from_path(Path::new(&args.file))
        .with_context(|| format!("failed to read catalog {}", args.file))?;
    let summary = ctx
        .db
        .import_catalog(&seed)
        .await
        .with_context(|| format!("failed to import catalog {}", args.file))?;
    tracing::info!(
        file = %args.file,
        families = summary.families,
        courses = summary.courses,
        lessons = summary.lessons,
        questions = summary.questions,
        "catalog imported"
    );
    Ok(summary)
}
