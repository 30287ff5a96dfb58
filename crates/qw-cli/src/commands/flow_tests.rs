//! Import, audit, repair, re-audit, and restore against one on-disk store.

use std::path::Path;

use pretty_assertions::assert_eq;
use qw_audit::LessonState;
use qw_config::QwConfig;
use qw_core::FindingCode;
use qw_repair::{LessonStatus, RunStatus};
use qw_store::{LessonScope, QuestionFilter, QuestionGateway};

use crate::cli::root_commands::{AuditArgs, ImportArgs, RepairArgs, RestoreArgs};
use crate::commands::{audit, import, repair, restore};
use crate::context::AppContext;

const CATALOG: &str = r#"
[[families]]
id = "planning"
name = "Planning"

[[courses]]
id = "planning-en"
family_id = "planning"
language = "en"
title = "Planning"

[[lessons]]
id = "pl-en-01"
course_id = "planning-en"
day_number = 1
title = "Clear goals"
body = """
## Clear goals
It is important to agree on **a single measurable goal** before a project starts. For example, a team that targets ten signed contracts by June can plan backwards. You should always write the goal where everyone can see it.
## Review cadence
Weekly reviews keep **progress visible** and let the team adjust early. Avoid changing the goal in every meeting, because the plan never settles.
"""
"#;

fn config(root: &Path) -> QwConfig {
    let mut config = QwConfig::default();
    config.repair.backup_dir = root.join("backups").display().to_string();
    config.audit.out_dir = root.join("reports").display().to_string();
    config.audit.tasklist_dir = root.join("tasks").display().to_string();
    config
}

fn audit_args() -> AuditArgs {
    AuditArgs {
        family: None,
        min_lesson_score: Some(0),
        include_inactive: false,
        out_dir: None,
        tasklist_dir: None,
    }
}

fn repair_args(dry_run: bool) -> RepairArgs {
    RepairArgs {
        course: "planning-en".into(),
        day: None,
        force_rewrite: false,
        dry_run,
        backup_dir: None,
    }
}

async fn context(root: &Path) -> AppContext {
    let catalog = root.join("catalog.toml");
    std::fs::write(&catalog, CATALOG).unwrap();
    let ctx = AppContext::open(config(root), &root.join("data").join("quiz.db"))
        .await
        .unwrap();
    let summary = import::run(
        &ImportArgs {
            file: catalog.display().to_string(),
        },
        &ctx,
    )
    .await
    .unwrap();
    assert_eq!(summary.lessons, 1);
    assert_eq!(summary.questions, 0);
    ctx
}

async fn active_count(ctx: &AppContext) -> usize {
    ctx.db
        .find(
            &LessonScope::new("planning-en", "pl-en-01"),
            QuestionFilter::Active,
        )
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn audit_repair_reaudit_restore() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path()).await;

    let (before, artifacts) = audit::run(&audit_args(), &ctx).await.unwrap();
    assert_eq!(before.status(), RunStatus::PartialFailure);
    let (_, _, finding) = before.lessons().next().unwrap();
    assert_eq!(finding.state, LessonState::Failing);
    assert!(finding.codes.contains(&FindingCode::TooFewValidQuestions));
    assert!(artifacts.report.exists());
    let checklist = std::fs::read_to_string(&artifacts.checklist).unwrap();
    assert!(checklist.contains("`qw repair planning-en --day 1`"));

    let summary = repair::run(&repair_args(false), &ctx).await.unwrap();
    assert_eq!(summary.status(), RunStatus::Success);
    let outcome = &summary.lessons[0];
    assert_eq!(outcome.status, LessonStatus::Compliant);
    assert!(outcome.committed);
    let filled = active_count(&ctx).await;
    assert!(filled >= 7);

    let (after, _) = audit::run(&audit_args(), &ctx).await.unwrap();
    assert_eq!(after.status(), RunStatus::Success);
    assert_eq!(after.totals.compliant, 1);

    let restored = restore::run(
        &RestoreArgs {
            backup: outcome.backup.display().to_string(),
            dry_run: false,
            backup_dir: None,
        },
        &ctx,
    )
    .await
    .unwrap();
    assert_eq!(restored.removed, filled);
    assert_eq!(restored.restored, 0);
    assert!(restored.backup.exists());
    assert_eq!(active_count(&ctx).await, 0);
}

#[tokio::test]
async fn dry_run_repair_leaves_the_store_alone() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path()).await;

    let summary = repair::run(&repair_args(true), &ctx).await.unwrap();
    let outcome = &summary.lessons[0];
    assert!(summary.dry_run);
    assert!(!outcome.committed);
    assert!(outcome.plan.filled() >= 7);
    assert!(outcome.backup.exists());
    assert_eq!(active_count(&ctx).await, 0);
}

#[tokio::test]
async fn unknown_course_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(dir.path()).await;

    let mut args = repair_args(false);
    args.course = "missing".into();
    let error = repair::run(&args, &ctx).await.unwrap_err();
    assert!(format!("{error:#}").contains("missing"));
}
