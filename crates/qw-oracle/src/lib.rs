//! # qw-oracle
//!
//! Quality oracle contracts and reference implementations for quizwright.
//!
//! The repair engine and audit treat oracles as opaque: they only see
//! [`Verdict`]s and [`BatchVerdict`]s. Every oracle reports a version string
//! so reports can record which rule set judged a lesson.
//!
//! - [`QualityOracle`]: single-question and whole-batch acceptance.
//! - [`LanguageIntegrityOracle`]: is the lesson written in its language?
//! - [`ContentQualityOracle`]: is the lesson body rich enough to quiz on?

mod integrity;
mod rules;
mod verdict;

pub use integrity::{HeuristicContentScorer, ScriptIntegrityOracle};
pub use rules::{RULES_V1, RuleOracle, RuleSettings};
pub use verdict::{
    BatchVerdict, ContentScore, LanguageVerdict, LessonContext, QuestionView, Verdict,
};

/// Accepts or rejects questions, one at a time or as a lesson's full batch.
pub trait QualityOracle {
    /// Identifier of the rule set, recorded alongside findings.
    fn version(&self) -> &str;

    fn validate_one(&self, item: &QuestionView<'_>, lesson: &LessonContext<'_>) -> Verdict;

    fn validate_batch(
        &self,
        items: &[QuestionView<'_>],
        language: &str,
        lesson_title: &str,
    ) -> BatchVerdict;
}

pub trait LanguageIntegrityOracle {
    fn check(&self, lesson: &qw_core::LessonContent) -> LanguageVerdict;
}

pub trait ContentQualityOracle {
    fn score(&self, lesson: &qw_core::LessonContent) -> ContentScore;
}
