//! End to end: libSQL catalog, real generator, report and checklist on disk.

mod support;

use qw_audit::{AuditSettings, Auditor, FamilyLink, LessonState, write_artifacts};
use qw_config::GeneratorConfig;
use qw_core::FindingCode;
use qw_generate::CandidateGenerator;
use qw_oracle::RuleOracle;
use qw_repair::RunStatus;
use qw_store::{CatalogWriter, QuizDb};
use support::{BODY, compliant_pool, course, family, lesson, seed};

#[tokio::test]
async fn audit_of_a_small_catalog_writes_both_artifacts() {
    let db = QuizDb::open_local(":memory:").await.unwrap();
    let day1 = lesson("pc-en-01", "prompt-craft-en", 1);
    let mut day2 = lesson("pc-en-02", "prompt-craft-en", 2);
    day2.body = format!("{BODY}\n{BODY}");
    let questions = compliant_pool(&day1);
    db.import_catalog(&seed(
        vec![family("prompt-craft", "Prompt Craft")],
        vec![course("prompt-craft-en", Some("prompt-craft"), "en")],
        vec![day1, day2],
        questions,
    ))
    .await
    .unwrap();

    let generator = CandidateGenerator::from_config(&GeneratorConfig::default()).unwrap();
    let oracle = RuleOracle::default();
    let report = Auditor::new(&db, &generator, &oracle)
        .with_settings(AuditSettings {
            min_lesson_score: 0,
            ..AuditSettings::default()
        })
        .run()
        .await
        .unwrap();

    let lessons = &report.families[0].courses[0].lessons;
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0].state, LessonState::Compliant);
    assert_eq!(lessons[1].state, LessonState::Failing);
    assert!(lessons[1].capacity.is_some());
    assert_eq!(report.status(), RunStatus::PartialFailure);

    let dir = tempfile::tempdir().unwrap();
    let artifacts = write_artifacts(&report, &dir.path().join("reports"), &dir.path().join("tasks"))
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&artifacts.report).unwrap()).unwrap();
    assert_eq!(json["families"][0]["family_id"], "prompt-craft");
    assert_eq!(json["totals"]["failing"], 1);

    let checklist = std::fs::read_to_string(&artifacts.checklist).unwrap();
    assert_eq!(checklist.matches("- [ ]").count(), 1);
    assert!(checklist.contains("`qw repair prompt-craft-en --day 2`"));
}

#[tokio::test]
async fn capacity_check_uses_the_inferred_family_bank() {
    let db = QuizDb::open_local(":memory:").await.unwrap();
    // Too short for the generic strategy; only the prompt-craft bank can help.
    let mut day1 = lesson("pc-en-01", "prompt-craft-en", 1);
    day1.body = "Short.".into();
    db.import_catalog(&seed(
        vec![family("prompt-craft", "Prompt Craft")],
        vec![course("prompt-craft-en", None, "en")],
        vec![day1],
        Vec::new(),
    ))
    .await
    .unwrap();

    let generator = CandidateGenerator::from_config(&GeneratorConfig::default()).unwrap();
    let oracle = RuleOracle::default();
    let report = Auditor::new(&db, &generator, &oracle)
        .with_settings(AuditSettings {
            min_lesson_score: 0,
            ..AuditSettings::default()
        })
        .run()
        .await
        .unwrap();

    let course = &report.families[0].courses[0];
    assert_eq!(report.families[0].family_id, "prompt-craft");
    assert_eq!(course.link, FamilyLink::Inferred);
    let finding = &course.lessons[0];
    let capacity = finding.capacity.unwrap();
    assert!(capacity.sufficient, "{capacity:?}");
    assert!(!finding.codes.contains(&FindingCode::GeneratorInsufficientForMinimums));
}
