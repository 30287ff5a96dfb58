//! Candidate acceptance, separate from generation.

use qw_core::{QuestionCandidate, QuestionType};
use qw_oracle::{LessonContext, QualityOracle, QuestionView};

use crate::accepted::AcceptedSet;

/// Whether `candidate` may join a lesson that already holds `accepted`.
pub fn is_acceptable<O>(
    candidate: &QuestionCandidate,
    oracle: &O,
    lesson: &LessonContext<'_>,
    accepted: &AcceptedSet,
) -> bool
where
    O: QualityOracle + ?Sized,
{
    candidate.question_type != QuestionType::Recall
        && !accepted.contains(&candidate.text)
        && oracle
            .validate_one(&QuestionView::from(candidate), lesson)
            .valid
}

/// First candidate in batch order that is acceptable and, when `need` is set,
/// of that type.
pub fn first_acceptable<O>(
    batch: Vec<QuestionCandidate>,
    oracle: &O,
    lesson: &LessonContext<'_>,
    accepted: &AcceptedSet,
    need: Option<QuestionType>,
) -> Option<QuestionCandidate>
where
    O: QualityOracle + ?Sized,
{
    batch.into_iter().find(|c| {
        need.is_none_or(|ty| c.question_type == ty) && is_acceptable(c, oracle, lesson, accepted)
    })
}

/// `accepted` extended with every acceptable candidate of `batch`, in order.
#[must_use]
pub fn accept_batch<O>(
    batch: &[QuestionCandidate],
    oracle: &O,
    lesson: &LessonContext<'_>,
    accepted: AcceptedSet,
) -> AcceptedSet
where
    O: QualityOracle + ?Sized,
{
    batch.iter().fold(accepted, |set, c| {
        if is_acceptable(c, oracle, lesson, &set) {
            set.with(&c.text, c.question_type)
        } else {
            set
        }
    })
}
