//! Oracle inputs and verdicts.

use qw_core::{Difficulty, LessonContent, PersistedQuestion, QuestionCandidate, QuestionType};
use serde::{Deserialize, Serialize};

/// Borrowed view of a question, generated or persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionView<'a> {
    pub text: &'a str,
    pub options: &'a [String; 4],
    pub correct_index: u8,
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
}

impl<'a> From<&'a QuestionCandidate> for QuestionView<'a> {
    fn from(c: &'a QuestionCandidate) -> Self {
        Self {
            text: &c.text,
            options: &c.options,
            correct_index: c.correct_index,
            question_type: c.question_type,
            difficulty: c.difficulty,
        }
    }
}

impl<'a> From<&'a PersistedQuestion> for QuestionView<'a> {
    fn from(q: &'a PersistedQuestion) -> Self {
        Self {
            text: &q.text,
            options: &q.options,
            correct_index: q.correct_index,
            question_type: q.question_type,
            difficulty: q.difficulty,
        }
    }
}

/// The lesson a question is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonContext<'a> {
    pub language: &'a str,
    pub title: &'a str,
    pub content: &'a str,
}

impl<'a> From<&'a LessonContent> for LessonContext<'a> {
    fn from(l: &'a LessonContent) -> Self {
        Self {
            language: &l.language,
            title: &l.title,
            content: &l.body,
        }
    }
}

/// Single-question verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Verdict {
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Valid exactly when `errors` is empty.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

/// Whole-batch verdict. Warnings never affect validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchVerdict {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl BatchVerdict {
    #[must_use]
    pub fn from_findings(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Whether a lesson is written in its declared language's script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageVerdict {
    pub ok: bool,
    /// Share of letters in the expected script.
    pub ratio: f64,
    pub detail: Option<String>,
}

/// 0–100 content quality score with the reasons points were withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentScore {
    pub score: u8,
    pub notes: Vec<String>,
}
