//! Oracle-driven classification of a lesson's persisted questions.
//!
//! Shared by the repair engine and the read-only audit.

use std::collections::HashMap;

use qw_core::{PersistedQuestion, QuestionType, TypeCounts};
use qw_oracle::{LessonContext, QualityOracle, QuestionView};
use serde::Serialize;

/// A question the oracle rejected, with its reasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejected {
    pub question: PersistedQuestion,
    pub errors: Vec<String>,
}

/// An oracle-valid question whose normalized text repeats a kept one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    pub question: PersistedQuestion,
    pub kept_id: i64,
}

/// valid / invalid / duplicate split, each in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub valid: Vec<PersistedQuestion>,
    pub invalid: Vec<Rejected>,
    pub duplicates: Vec<Duplicate>,
}

impl Classification {
    #[must_use]
    pub fn valid_counts(&self) -> TypeCounts {
        TypeCounts::tally(self.valid.iter().map(|q| q.question_type))
    }

    /// First concrete oracle error, for reports.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.invalid
            .iter()
            .find_map(|r| r.errors.first())
            .map(String::as_str)
    }
}

/// Split `questions` using `oracle`.
///
/// Recall questions are always invalid, whatever the oracle says. Among valid
/// questions sharing a normalized text the lowest id survives.
pub fn classify<O>(
    questions: &[PersistedQuestion],
    oracle: &O,
    lesson: &LessonContext<'_>,
) -> Classification
where
    O: QualityOracle + ?Sized,
{
    let mut ordered: Vec<&PersistedQuestion> = questions.iter().collect();
    ordered.sort_by_key(|q| (q.display_order, q.id));

    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for question in ordered {
        let mut verdict = oracle.validate_one(&QuestionView::from(question), lesson);
        if question.question_type == QuestionType::Recall && verdict.valid {
            verdict.valid = false;
            verdict
                .errors
                .push("recall_not_allowed: recall questions are not kept".into());
        }
        if verdict.valid {
            valid.push(question.clone());
        } else {
            invalid.push(Rejected {
                question: question.clone(),
                errors: verdict.errors,
            });
        }
    }

    let mut survivor: HashMap<String, i64> = HashMap::new();
    for q in &valid {
        survivor
            .entry(q.normalized_text())
            .and_modify(|id| *id = (*id).min(q.id))
            .or_insert(q.id);
    }
    let (kept, repeated): (Vec<_>, Vec<_>) = valid
        .into_iter()
        .partition(|q| survivor.get(&q.normalized_text()) == Some(&q.id));
    let duplicates = repeated
        .into_iter()
        .map(|q| {
            let kept_id = survivor.get(&q.normalized_text()).copied().unwrap_or(q.id);
            Duplicate {
                question: q,
                kept_id,
            }
        })
        .collect();

    Classification {
        valid: kept,
        invalid,
        duplicates,
    }
}
