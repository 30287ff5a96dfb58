//! Question types, difficulty levels, and finding codes.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! except [`FindingCode`], which keeps the upper-case form operators grep for in
//! reports and checklists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// QuestionType
// ---------------------------------------------------------------------------

/// Cognitive type of a quiz question.
///
/// `Recall` only ever appears in legacy persisted data. Nothing in quizwright
/// produces it and a compliant lesson holds none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Application,
    CriticalThinking,
    Recall,
}

impl QuestionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::CriticalThinking => "critical_thinking",
            Self::Recall => "recall",
        }
    }

    /// Types the generator is allowed to emit.
    #[must_use]
    pub const fn generated() -> &'static [Self] {
        &[Self::Application, Self::CriticalThinking]
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "application" => Ok(Self::Application),
            "critical_thinking" => Ok(Self::CriticalThinking),
            "recall" => Ok(Self::Recall),
            other => Err(CoreError::Validation(format!(
                "unknown question type '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Difficulty of a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(CoreError::Validation(format!(
                "unknown difficulty '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// DifficultyTier
// ---------------------------------------------------------------------------

/// Coarse position of a lesson inside its course, carried as candidate metadata.
///
/// ```text
/// days 1–10  → foundation
/// days 11–20 → intermediate
/// days 21+   → advanced
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    Foundation,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    #[must_use]
    pub const fn for_day(day: u32) -> Self {
        match day {
            0..=10 => Self::Foundation,
            11..=20 => Self::Intermediate,
            _ => Self::Advanced,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FindingCode
// ---------------------------------------------------------------------------

/// Compliance failure codes surfaced by repair outcomes and audit findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingCode {
    LanguageIntegrityFailure,
    QualityBelowThreshold,
    RecallPresent,
    TooFewValidQuestions,
    TooFewApplicationQuestions,
    InvalidQuestionsPresent,
    DuplicateQuestionsPresent,
    GeneratorInsufficientForMinimums,
    FatalStorageOrInputError,
}

impl FindingCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LanguageIntegrityFailure => "LANGUAGE_INTEGRITY_FAILURE",
            Self::QualityBelowThreshold => "QUALITY_BELOW_THRESHOLD",
            Self::RecallPresent => "RECALL_PRESENT",
            Self::TooFewValidQuestions => "TOO_FEW_VALID_QUESTIONS",
            Self::TooFewApplicationQuestions => "TOO_FEW_APPLICATION_QUESTIONS",
            Self::InvalidQuestionsPresent => "INVALID_QUESTIONS_PRESENT",
            Self::DuplicateQuestionsPresent => "DUPLICATE_QUESTIONS_PRESENT",
            Self::GeneratorInsufficientForMinimums => "GENERATOR_INSUFFICIENT_FOR_MINIMUMS",
            Self::FatalStorageOrInputError => "FATAL_STORAGE_OR_INPUT_ERROR",
        }
    }

    /// Whether the code blocks a lesson from being compliant on its own.
    ///
    /// Invalid and duplicate questions are repairable noise when the valid
    /// set already meets quota; everything else is blocking.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        !matches!(
            self,
            Self::InvalidQuestionsPresent | Self::DuplicateQuestionsPresent
        )
    }
}

impl fmt::Display for FindingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_parses_its_own_output() {
        for ty in [
            QuestionType::Application,
            QuestionType::CriticalThinking,
            QuestionType::Recall,
        ] {
            assert_eq!(ty.as_str().parse::<QuestionType>().unwrap(), ty);
        }
        assert!("trivia".parse::<QuestionType>().is_err());
    }

    #[test]
    fn generated_types_exclude_recall() {
        assert!(!QuestionType::generated().contains(&QuestionType::Recall));
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(DifficultyTier::for_day(1), DifficultyTier::Foundation);
        assert_eq!(DifficultyTier::for_day(10), DifficultyTier::Foundation);
        assert_eq!(DifficultyTier::for_day(11), DifficultyTier::Intermediate);
        assert_eq!(DifficultyTier::for_day(20), DifficultyTier::Intermediate);
        assert_eq!(DifficultyTier::for_day(21), DifficultyTier::Advanced);
    }

    #[test]
    fn finding_code_serializes_screaming() {
        let json = serde_json::to_string(&FindingCode::RecallPresent).unwrap();
        assert_eq!(json, "\"RECALL_PRESENT\"");
        assert_eq!(
            FindingCode::GeneratorInsufficientForMinimums.to_string(),
            "GENERATOR_INSUFFICIENT_FOR_MINIMUMS"
        );
    }

    #[test]
    fn invalid_and_duplicate_codes_are_not_blocking() {
        assert!(!FindingCode::InvalidQuestionsPresent.is_blocking());
        assert!(!FindingCode::DuplicateQuestionsPresent.is_blocking());
        assert!(FindingCode::RecallPresent.is_blocking());
    }
}
