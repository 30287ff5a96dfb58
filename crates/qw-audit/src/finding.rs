//! Per-lesson audit findings.

use qw_core::{Deficits, FindingCode, TypeCounts};
use qw_oracle::{ContentScore, LanguageVerdict};
use qw_repair::Classification;
use serde::Serialize;

/// How many duplicate and invalid questions a finding quotes.
pub const SAMPLE_LIMIT: usize = 3;

/// Where a lesson stands after the audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonState {
    Compliant,
    /// Only invalid or duplicate noise; a repair run clears it without generating.
    NeedsCleanup,
    Failing,
    /// The lesson or its questions could not be read as valid records.
    Fatal,
}

impl LessonState {
    #[must_use]
    pub fn from_codes(codes: &[FindingCode]) -> Self {
        if codes.contains(&FindingCode::FatalStorageOrInputError) {
            Self::Fatal
        } else if codes.iter().any(|c| c.is_blocking()) {
            Self::Failing
        } else if codes.is_empty() {
            Self::Compliant
        } else {
            Self::NeedsCleanup
        }
    }

    /// Whether the lesson earns a checklist item.
    #[must_use]
    pub const fn needs_attention(self) -> bool {
        !matches!(self, Self::Compliant)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LessonCounts {
    pub active: usize,
    pub valid: usize,
    pub invalid: usize,
    pub duplicates: usize,
    /// Active recall questions, valid or not.
    pub recall: usize,
    pub valid_types: TypeCounts,
}

impl LessonCounts {
    #[must_use]
    pub fn from_classification(classification: &Classification, recall: usize) -> Self {
        Self {
            active: classification.valid.len()
                + classification.invalid.len()
                + classification.duplicates.len(),
            valid: classification.valid.len(),
            invalid: classification.invalid.len(),
            duplicates: classification.duplicates.len(),
            recall,
            valid_types: classification.valid_counts(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionSample {
    pub id: i64,
    pub text: String,
    /// First oracle error, or the id of the surviving copy for duplicates.
    pub detail: String,
}

impl QuestionSample {
    #[must_use]
    pub fn invalid(classification: &Classification) -> Vec<Self> {
        classification
            .invalid
            .iter()
            .take(SAMPLE_LIMIT)
            .map(|r| Self {
                id: r.question.id,
                text: r.question.text.clone(),
                detail: r.errors.first().cloned().unwrap_or_default(),
            })
            .collect()
    }

    #[must_use]
    pub fn duplicates(classification: &Classification) -> Vec<Self> {
        classification
            .duplicates
            .iter()
            .take(SAMPLE_LIMIT)
            .map(|d| Self {
                id: d.question.id,
                text: d.question.text.clone(),
                detail: format!("repeats #{}", d.kept_id),
            })
            .collect()
    }
}

/// Result of the one-shot generator pass for a lesson below quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapacityProjection {
    pub seed: u64,
    pub requested: usize,
    pub generated: usize,
    /// Candidates that passed the oracle and repeat nothing already valid.
    pub acceptable: usize,
    pub deficits: Deficits,
    /// Valid counts plus acceptable candidates.
    pub projected: TypeCounts,
    pub sufficient: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonFinding {
    pub lesson_id: String,
    pub day_number: u32,
    pub title: String,
    pub language: String,
    pub active: bool,
    pub state: LessonState,
    pub codes: Vec<FindingCode>,
    pub counts: LessonCounts,
    pub first_error: Option<String>,
    pub duplicate_samples: Vec<QuestionSample>,
    pub invalid_samples: Vec<QuestionSample>,
    pub language_check: Option<LanguageVerdict>,
    pub content: Option<ContentScore>,
    pub capacity: Option<CapacityProjection>,
}

impl LessonFinding {
    #[must_use]
    pub fn language_ok(&self) -> bool {
        self.language_check.as_ref().is_some_and(|v| v.ok)
    }

    #[must_use]
    pub fn content_score(&self) -> Option<u8> {
        self.content.as_ref().map(|c| c.score)
    }

    /// Whether fixing this lesson needs an author, not just `qw repair`.
    #[must_use]
    pub fn needs_content_work(&self) -> bool {
        self.codes.iter().any(|c| {
            matches!(
                c,
                FindingCode::LanguageIntegrityFailure | FindingCode::QualityBelowThreshold
            )
        })
    }
}
