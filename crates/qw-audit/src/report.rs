//! Nested audit report: family → course → lesson, with rollups at each level.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use qw_config::AuditConfig;
use qw_core::FindingCode;
use qw_repair::RunStatus;
use serde::Serialize;

use crate::finding::{LessonFinding, LessonState};
use crate::hierarchy::FamilyLink;

/// Counts summed over any set of lesson findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rollup {
    pub lessons: usize,
    pub compliant: usize,
    pub needs_cleanup: usize,
    pub failing: usize,
    pub fatal: usize,
    pub active_questions: usize,
    pub valid_questions: usize,
    pub invalid_questions: usize,
    pub duplicate_questions: usize,
    pub by_code: BTreeMap<FindingCode, usize>,
}

impl Rollup {
    pub fn add(&mut self, finding: &LessonFinding) {
        self.lessons += 1;
        match finding.state {
            LessonState::Compliant => self.compliant += 1,
            LessonState::NeedsCleanup => self.needs_cleanup += 1,
            LessonState::Failing => self.failing += 1,
            LessonState::Fatal => self.fatal += 1,
        }
        self.active_questions += finding.counts.active;
        self.valid_questions += finding.counts.valid;
        self.invalid_questions += finding.counts.invalid;
        self.duplicate_questions += finding.counts.duplicates;
        for code in &finding.codes {
            *self.by_code.entry(*code).or_default() += 1;
        }
    }

    pub fn merge(&mut self, other: &Self) {
        self.lessons += other.lessons;
        self.compliant += other.compliant;
        self.needs_cleanup += other.needs_cleanup;
        self.failing += other.failing;
        self.fatal += other.fatal;
        self.active_questions += other.active_questions;
        self.valid_questions += other.valid_questions;
        self.invalid_questions += other.invalid_questions;
        self.duplicate_questions += other.duplicate_questions;
        for (code, n) in &other.by_code {
            *self.by_code.entry(*code).or_default() += n;
        }
    }

    /// Lessons that get a checklist item.
    #[must_use]
    pub const fn attention(&self) -> usize {
        self.needs_cleanup + self.failing + self.fatal
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseReport {
    pub course_id: String,
    pub title: String,
    pub language: String,
    pub active: bool,
    pub link: FamilyLink,
    pub totals: Rollup,
    pub lessons: Vec<LessonFinding>,
}

impl CourseReport {
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        self.totals.attention() > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyReport {
    pub family_id: String,
    pub name: String,
    pub totals: Rollup,
    pub courses: Vec<CourseReport>,
}

/// Settings an audit ran with, echoed into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditSettings {
    pub min_lesson_score: u8,
    pub include_inactive: bool,
    pub family: Option<String>,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            min_lesson_score: 60,
            include_inactive: false,
            family: None,
        }
    }
}

impl From<&AuditConfig> for AuditSettings {
    fn from(config: &AuditConfig) -> Self {
        Self {
            min_lesson_score: u8::try_from(config.min_lesson_score.min(100)).unwrap_or(100),
            include_inactive: config.include_inactive,
            family: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub oracle_version: String,
    pub settings: AuditSettings,
    pub totals: Rollup,
    pub families: Vec<FamilyReport>,
}

impl AuditReport {
    /// `Fatal` if any lesson could not be read, `PartialFailure` if any other
    /// lesson needs attention.
    ///
    /// Unlike `qw repair`, which stops at the first malformed record, the audit
    /// records each one as a fatal finding and finishes the walk, so one run
    /// lists every broken lesson. The exit status is still `Fatal` (2).
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        if self.totals.fatal > 0 {
            RunStatus::Fatal
        } else if self.totals.attention() > 0 {
            RunStatus::PartialFailure
        } else {
            RunStatus::Success
        }
    }

    pub fn lessons(&self) -> impl Iterator<Item = (&FamilyReport, &CourseReport, &LessonFinding)> {
        self.families.iter().flat_map(|f| {
            f.courses
                .iter()
                .flat_map(move |c| c.lessons.iter().map(move |l| (f, c, l)))
        })
    }
}
