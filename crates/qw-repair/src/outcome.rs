//! Per-lesson outcomes and run-level exit status.

use std::path::PathBuf;

use qw_core::{FindingCode, TypeCounts};
use qw_oracle::BatchVerdict;
use serde::Serialize;

use crate::plan::MutationPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    Compliant,
    NonCompliant,
}

/// What a repair run did (or would do, in dry-run) to one lesson.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonOutcome {
    pub course_id: String,
    pub lesson_id: String,
    pub day_number: u32,
    pub status: LessonStatus,
    pub codes: Vec<FindingCode>,
    /// The valid set already met quota; only invalid and duplicate items were removed.
    pub shortcut: bool,
    pub force_rewrite: bool,
    pub before: TypeCounts,
    pub after: TypeCounts,
    /// Persisted questions left untouched.
    pub kept: usize,
    pub generator_calls: usize,
    /// Total deficit entering the fill phase.
    pub fill_deficit: usize,
    pub batch: BatchVerdict,
    pub plan: MutationPlan,
    pub dry_run: bool,
    pub committed: bool,
    pub backup: PathBuf,
}

impl LessonOutcome {
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.status == LessonStatus::Compliant
    }
}

/// Process-level result reported through the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    PartialFailure,
    Fatal,
}

impl RunStatus {
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::PartialFailure => 1,
            Self::Fatal => 2,
        }
    }
}

/// All lesson outcomes of one `repair` invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub course_id: String,
    pub dry_run: bool,
    pub lessons: Vec<LessonOutcome>,
}

impl RunSummary {
    #[must_use]
    pub fn compliant(&self) -> usize {
        self.lessons.iter().filter(|l| l.is_compliant()).count()
    }

    #[must_use]
    pub fn non_compliant(&self) -> usize {
        self.lessons.len() - self.compliant()
    }

    #[must_use]
    pub fn status(&self) -> RunStatus {
        if self.non_compliant() == 0 {
            RunStatus::Success
        } else {
            RunStatus::PartialFailure
        }
    }
}
