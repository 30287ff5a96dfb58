//! # qw-audit
//!
//! Read-only compliance audit for quizwright.
//!
//! The audit walks family → course → lesson, classifies each lesson's active
//! questions with the same logic the repair engine uses, adds language and
//! content verdicts, and projects with one generator call whether `qw repair`
//! could bring a short lesson up to quota. Nothing is written to the store.
//!
//! Output is an [`AuditReport`] (nested findings with rollups) and a Markdown
//! remediation checklist, both persisted by [`write_artifacts`] as
//! timestamped, write-once files.

mod artifacts;
mod auditor;
mod checklist;
mod error;
mod finding;
pub mod hierarchy;
mod report;

pub use artifacts::{AuditArtifacts, write_artifacts};
pub use auditor::Auditor;
pub use checklist::{next_step, render_checklist};
pub use error::AuditError;
pub use finding::{
    CapacityProjection, LessonCounts, LessonFinding, LessonState, QuestionSample, SAMPLE_LIMIT,
};
pub use hierarchy::{FamilyLink, UNASSIGNED};
pub use report::{AuditReport, AuditSettings, CourseReport, FamilyReport, Rollup};
