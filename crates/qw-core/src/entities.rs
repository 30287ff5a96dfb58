//! Catalog and question entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Difficulty, DifficultyTier, QuestionType};
use crate::errors::CoreError;
use crate::normalize::normalize_question_text;

/// A group of related course variants (same curriculum across languages or tiers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseFamily {
    pub id: String,
    pub name: String,
}

/// A course in one language.
///
/// `family_id` is optional because older courses were created before families
/// existed; the audit infers their family from the course identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub family_id: Option<String>,
    pub language: String,
    pub title: String,
    pub active: bool,
}

impl Course {
    /// Family used to pick generation strategies: the declared link, else
    /// the family inferred from the id, else the course id itself.
    #[must_use]
    pub fn generation_family(&self, families: &[CourseFamily]) -> String {
        if let Some(id) = &self.family_id {
            return id.clone();
        }
        infer_family(&self.id, families).map_or_else(|| self.id.clone(), |f| f.id.clone())
    }
}

/// The longest family id that `course_id` equals or starts with, followed by
/// `-` or `_`. `prompt-crafty` does not match `prompt-craft`.
#[must_use]
pub fn infer_family<'f>(course_id: &str, families: &'f [CourseFamily]) -> Option<&'f CourseFamily> {
    families
        .iter()
        .filter(|f| !f.id.is_empty())
        .filter(|f| {
            course_id.strip_prefix(f.id.as_str()).is_some_and(|rest| {
                rest.is_empty() || rest.starts_with('-') || rest.starts_with('_')
            })
        })
        .max_by_key(|f| f.id.len())
}

/// One day's instructional unit. Read-only to quizwright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonContent {
    pub id: String,
    pub course_id: String,
    pub day_number: u32,
    pub title: String,
    pub body: String,
    pub language: String,
    pub active: bool,
}

impl LessonContent {
    /// Reject records that cannot be worked on at all.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Malformed` when the id, course, title, or language is
    /// blank, or the day number is zero.
    pub fn check_well_formed(&self) -> Result<(), CoreError> {
        let reason = if self.id.trim().is_empty() {
            Some("empty id")
        } else if self.course_id.trim().is_empty() {
            Some("empty course id")
        } else if self.day_number == 0 {
            Some("day number must start at 1")
        } else if self.title.trim().is_empty() {
            Some("empty title")
        } else if self.language.trim().is_empty() {
            Some("empty language")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(CoreError::Malformed {
                entity_type: "lesson".into(),
                id: self.id.clone(),
                reason: reason.into(),
            }),
            None => Ok(()),
        }
    }
}

/// Deterministic metadata attached to every generated candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMetadata {
    pub day: u32,
    pub language: String,
    pub course_family: String,
    pub tier: DifficultyTier,
    pub question_type: QuestionType,
    /// Name of the generation strategy that produced the candidate.
    pub strategy: String,
}

impl CandidateMetadata {
    /// Hashtags derived from the metadata, in a fixed order.
    #[must_use]
    pub fn hashtags(&self) -> Vec<String> {
        vec![
            format!("#day-{}", self.day),
            format!("#lang-{}", self.language),
            format!("#family-{}", self.course_family),
            format!("#{}", self.question_type),
            format!("#{}", self.tier),
        ]
    }
}

/// A generated-but-unpersisted question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionCandidate {
    pub text: String,
    pub options: [String; 4],
    pub correct_index: u8,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub hashtags: Vec<String>,
    pub metadata: CandidateMetadata,
}

impl QuestionCandidate {
    #[must_use]
    pub fn normalized_text(&self) -> String {
        normalize_question_text(&self.text)
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[usize::from(self.correct_index.min(3))]
    }
}

/// How often a persisted question has been served and answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    pub shown: u64,
    pub answered: u64,
    pub correct: u64,
}

/// An accepted, stored question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedQuestion {
    pub id: i64,
    pub course_id: String,
    pub lesson_id: String,
    pub course_specific: bool,
    pub text: String,
    pub options: [String; 4],
    pub correct_index: u8,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub hashtags: Vec<String>,
    pub display_order: u32,
    pub active: bool,
    pub usage: UsageCounters,
    pub created_at: DateTime<Utc>,
}

impl PersistedQuestion {
    #[must_use]
    pub fn normalized_text(&self) -> String {
        normalize_question_text(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn family(id: &str) -> CourseFamily {
        CourseFamily {
            id: id.into(),
            name: id.to_uppercase(),
        }
    }

    fn course(id: &str, family_id: Option<&str>) -> Course {
        Course {
            id: id.into(),
            family_id: family_id.map(String::from),
            language: "en".into(),
            title: id.into(),
            active: true,
        }
    }

    #[rstest]
    #[case("prompt-craft-hu", Some("prompt-craft"))]
    #[case("prompt-craft_ru", Some("prompt-craft"))]
    #[case("prompt-craft", Some("prompt-craft"))]
    #[case("prompt-basics-en", Some("prompt"))]
    #[case("prompt-crafty-en", Some("prompt"))]
    #[case("promptly", None)]
    #[case("sales-en", None)]
    fn longest_prefix_respects_separators(#[case] course_id: &str, #[case] expected: Option<&str>) {
        let families = vec![family("prompt"), family("prompt-craft")];
        assert_eq!(
            infer_family(course_id, &families).map(|f| f.id.as_str()),
            expected
        );
    }

    #[rstest]
    #[case::declared_wins(course("prompt-craft-en", Some("sales")), "sales")]
    #[case::inferred(course("prompt-craft-en", None), "prompt-craft")]
    #[case::own_id(course("legacy-en", None), "legacy-en")]
    fn generation_family_resolution(#[case] c: Course, #[case] expected: &str) {
        let families = vec![family("prompt"), family("prompt-craft"), family("sales")];
        assert_eq!(c.generation_family(&families), expected);
    }

    fn lesson() -> LessonContent {
        LessonContent {
            id: "les-1".into(),
            course_id: "crs-1".into(),
            day_number: 3,
            title: "Prompt structure".into(),
            body: "body".into(),
            language: "en".into(),
            active: true,
        }
    }

    #[test]
    fn well_formed_lesson_passes() {
        assert!(lesson().check_well_formed().is_ok());
    }

    #[test]
    fn zero_day_is_malformed() {
        let mut l = lesson();
        l.day_number = 0;
        let err = l.check_well_formed().unwrap_err();
        assert!(err.to_string().contains("day number"));
    }

    #[test]
    fn hashtags_follow_metadata() {
        let meta = CandidateMetadata {
            day: 4,
            language: "hu".into(),
            course_family: "ai-basics".into(),
            tier: DifficultyTier::Foundation,
            question_type: QuestionType::CriticalThinking,
            strategy: "generic".into(),
        };
        assert_eq!(
            meta.hashtags(),
            vec![
                "#day-4",
                "#lang-hu",
                "#family-ai-basics",
                "#critical_thinking",
                "#foundation"
            ]
        );
    }
}
