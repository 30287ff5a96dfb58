//! Persistence gateway contracts.
//!
//! Every question operation is scoped by a [`LessonScope`]; nothing here can
//! read or write across lessons.

use std::fmt;

use qw_core::{
    Course, CourseFamily, Difficulty, LessonContent, PersistedQuestion, QuestionCandidate,
    QuestionType, UsageCounters, normalize_question_text,
};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::seed::CatalogSeed;

/// The (course, lesson, course-specific) key a question pool lives under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LessonScope {
    pub course_id: String,
    pub lesson_id: String,
    pub course_specific: bool,
}

impl LessonScope {
    #[must_use]
    pub fn new(course_id: impl Into<String>, lesson_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            lesson_id: lesson_id.into(),
            course_specific: true,
        }
    }

    #[must_use]
    pub fn for_lesson(lesson: &LessonContent) -> Self {
        Self::new(lesson.course_id.clone(), lesson.id.clone())
    }

    #[must_use]
    pub fn contains(&self, question: &PersistedQuestion) -> bool {
        question.course_id == self.course_id
            && question.lesson_id == self.lesson_id
            && question.course_specific == self.course_specific
    }
}

impl fmt::Display for LessonScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.course_id, self.lesson_id)
    }
}

/// Which questions `find` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuestionFilter {
    #[default]
    Active,
    All,
}

/// A question about to be stored. The gateway assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub options: [String; 4],
    pub correct_index: u8,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub display_order: u32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub usage: UsageCounters,
}

const fn default_true() -> bool {
    true
}

impl NewQuestion {
    /// An accepted candidate placed at `display_order`.
    #[must_use]
    pub fn from_candidate(candidate: &QuestionCandidate, display_order: u32) -> Self {
        Self {
            text: candidate.text.clone(),
            options: candidate.options.clone(),
            correct_index: candidate.correct_index,
            difficulty: candidate.difficulty,
            question_type: candidate.question_type,
            hashtags: candidate.hashtags.clone(),
            display_order,
            active: true,
            usage: UsageCounters::default(),
        }
    }

    /// A copy of a stored question, keeping its order and usage counters.
    #[must_use]
    pub fn from_persisted(question: &PersistedQuestion) -> Self {
        Self {
            text: question.text.clone(),
            options: question.options.clone(),
            correct_index: question.correct_index,
            difficulty: question.difficulty,
            question_type: question.question_type,
            hashtags: question.hashtags.clone(),
            display_order: question.display_order,
            active: question.active,
            usage: question.usage,
        }
    }

    #[must_use]
    pub fn normalized_text(&self) -> String {
        normalize_question_text(&self.text)
    }
}

/// Row counts written by a catalog import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub families: usize,
    pub courses: usize,
    pub lessons: usize,
    pub questions: usize,
}

/// Lesson-scoped question CRUD.
#[allow(async_fn_in_trait)]
pub trait QuestionGateway {
    /// Questions in `scope`, ordered by display order then id.
    async fn find(
        &self,
        scope: &LessonScope,
        filter: QuestionFilter,
    ) -> Result<Vec<PersistedQuestion>, StoreError>;

    /// Delete the given ids within `scope`. Ids outside the scope are ignored.
    async fn delete(&self, scope: &LessonScope, ids: &[i64]) -> Result<usize, StoreError>;

    /// Insert `items` into `scope`, returning them with assigned ids.
    async fn insert(
        &self,
        scope: &LessonScope,
        items: &[NewQuestion],
    ) -> Result<Vec<PersistedQuestion>, StoreError>;

    /// Delete then insert as one unit of work.
    ///
    /// The default runs the two steps back to back; transactional stores
    /// override it.
    async fn replace(
        &self,
        scope: &LessonScope,
        delete_ids: &[i64],
        items: &[NewQuestion],
    ) -> Result<(usize, Vec<PersistedQuestion>), StoreError> {
        let deleted = self.delete(scope, delete_ids).await?;
        let inserted = self.insert(scope, items).await?;
        Ok((deleted, inserted))
    }
}

/// Read access to families, courses, and lessons.
#[allow(async_fn_in_trait)]
pub trait CatalogReader {
    async fn families(&self) -> Result<Vec<CourseFamily>, StoreError>;

    /// Courses ordered by id.
    async fn courses(&self, include_inactive: bool) -> Result<Vec<Course>, StoreError>;

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown course id.
    async fn course(&self, course_id: &str) -> Result<Course, StoreError>;

    /// Lessons of one course ordered by day number.
    async fn lessons(
        &self,
        course_id: &str,
        include_inactive: bool,
    ) -> Result<Vec<LessonContent>, StoreError>;
}

/// Bulk catalog loading.
#[allow(async_fn_in_trait)]
pub trait CatalogWriter {
    /// Upsert families, courses, and lessons; append any seeded questions.
    async fn import_catalog(&self, seed: &CatalogSeed) -> Result<ImportSummary, StoreError>;
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn persisted(lesson_id: &str, course_specific: bool) -> PersistedQuestion {
        PersistedQuestion {
            id: 1,
            course_id: "c1".into(),
            lesson_id: lesson_id.into(),
            course_specific,
            text: "Which step comes first?".into(),
            options: ["a".into(), "b".into(), "c".into(), "d".into()],
            correct_index: 2,
            difficulty: Difficulty::Medium,
            question_type: QuestionType::Application,
            hashtags: vec!["#day-1".into()],
            display_order: 4,
            active: true,
            usage: UsageCounters {
                shown: 10,
                answered: 8,
                correct: 5,
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn scope_matches_course_lesson_and_flag() {
        let scope = LessonScope::new("c1", "l1");
        assert!(scope.contains(&persisted("l1", true)));
        assert!(!scope.contains(&persisted("l2", true)));
        assert!(!scope.contains(&persisted("l1", false)));
        assert_eq!(scope.to_string(), "c1/l1");
    }

    #[test]
    fn copy_of_persisted_keeps_order_and_usage() {
        let q = persisted("l1", true);
        let copy = NewQuestion::from_persisted(&q);
        assert_eq!(copy.display_order, 4);
        assert_eq!(copy.usage.answered, 8);
        assert_eq!(copy.normalized_text(), "which step comes first?");
    }
}
