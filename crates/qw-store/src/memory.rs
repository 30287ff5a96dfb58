//! In-process store for tests and fixtures.
//!
//! Mirrors `QuizDb` semantics (scope filtering, ordering, upserting imports)
//! without touching disk. Also counts writes so callers can assert that a
//! run left storage untouched.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use qw_core::{Course, CourseFamily, LessonContent, PersistedQuestion};

use crate::error::StoreError;
use crate::gateway::{
    CatalogReader, CatalogWriter, ImportSummary, LessonScope, NewQuestion, QuestionFilter,
    QuestionGateway,
};
use crate::seed::CatalogSeed;

#[derive(Debug, Default)]
struct State {
    families: Vec<CourseFamily>,
    courses: Vec<Course>,
    lessons: Vec<LessonContent>,
    questions: Vec<PersistedQuestion>,
    last_id: i64,
    writes: usize,
}

impl State {
    fn insert(&mut self, scope: &LessonScope, items: &[NewQuestion]) -> Vec<PersistedQuestion> {
        let now = Utc::now();
        let inserted: Vec<PersistedQuestion> = items
            .iter()
            .map(|item| {
                self.last_id += 1;
                PersistedQuestion {
                    id: self.last_id,
                    course_id: scope.course_id.clone(),
                    lesson_id: scope.lesson_id.clone(),
                    course_specific: scope.course_specific,
                    text: item.text.clone(),
                    options: item.options.clone(),
                    correct_index: item.correct_index,
                    difficulty: item.difficulty,
                    question_type: item.question_type,
                    hashtags: item.hashtags.clone(),
                    display_order: item.display_order,
                    active: item.active,
                    usage: item.usage,
                    created_at: now,
                }
            })
            .collect();
        self.questions.extend(inserted.iter().cloned());
        inserted
    }

    fn delete(&mut self, scope: &LessonScope, ids: &[i64]) -> usize {
        let before = self.questions.len();
        self.questions
            .retain(|q| !(scope.contains(q) && ids.contains(&q.id)));
        before - self.questions.len()
    }

    fn upsert<T, F: Fn(&T) -> &str>(rows: &mut Vec<T>, row: T, key: F) {
        match rows.iter().position(|r| key(r) == key(&row)) {
            Some(i) => rows[i] = row,
            None => rows.push(row),
        }
    }
}

/// `Mutex`-guarded in-memory implementation of every gateway trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with `seed`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidState` if a seeded lesson's language cannot
    /// be resolved.
    pub fn from_seed(seed: &CatalogSeed) -> Result<Self, StoreError> {
        let store = Self::new();
        store.apply_seed(seed)?;
        store.lock()?.writes = 0;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::InvalidState("memory store lock poisoned".into()))
    }

    fn apply_seed(&self, seed: &CatalogSeed) -> Result<ImportSummary, StoreError> {
        let mut state = self.lock()?;
        let known: HashMap<String, String> = state
            .courses
            .iter()
            .map(|c| (c.id.clone(), c.language.clone()))
            .collect();
        let lessons = seed.lesson_entities(&known)?;
        let courses = seed.course_entities();

        let mut summary = ImportSummary::default();
        for family in &seed.families {
            State::upsert(&mut state.families, family.clone(), |f| f.id.as_str());
            summary.families += 1;
        }
        for course in courses {
            State::upsert(&mut state.courses, course, |c| c.id.as_str());
            summary.courses += 1;
        }
        for lesson in lessons {
            State::upsert(&mut state.lessons, lesson, |l| l.id.as_str());
            summary.lessons += 1;
        }
        for (scope, items) in seed.question_groups() {
            summary.questions += state.insert(&scope, &items).len();
        }
        state.writes += 1;
        Ok(summary)
    }

    /// Number of mutating gateway calls that changed stored questions or catalog rows.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().map(|s| s.writes).unwrap_or_default()
    }

    /// Every stored question, in insertion order.
    #[must_use]
    pub fn all_questions(&self) -> Vec<PersistedQuestion> {
        self.lock().map(|s| s.questions.clone()).unwrap_or_default()
    }
}

impl QuestionGateway for MemoryStore {
    async fn find(
        &self,
        scope: &LessonScope,
        filter: QuestionFilter,
    ) -> Result<Vec<PersistedQuestion>, StoreError> {
        let state = self.lock()?;
        let mut found: Vec<PersistedQuestion> = state
            .questions
            .iter()
            .filter(|q| scope.contains(q))
            .filter(|q| filter == QuestionFilter::All || q.active)
            .cloned()
            .collect();
        found.sort_by_key(|q| (q.display_order, q.id));
        Ok(found)
    }

    async fn delete(&self, scope: &LessonScope, ids: &[i64]) -> Result<usize, StoreError> {
        let mut state = self.lock()?;
        let deleted = state.delete(scope, ids);
        if deleted > 0 {
            state.writes += 1;
        }
        Ok(deleted)
    }

    async fn insert(
        &self,
        scope: &LessonScope,
        items: &[NewQuestion],
    ) -> Result<Vec<PersistedQuestion>, StoreError> {
        let mut state = self.lock()?;
        let inserted = state.insert(scope, items);
        if !inserted.is_empty() {
            state.writes += 1;
        }
        Ok(inserted)
    }

    async fn replace(
        &self,
        scope: &LessonScope,
        delete_ids: &[i64],
        items: &[NewQuestion],
    ) -> Result<(usize, Vec<PersistedQuestion>), StoreError> {
        let mut state = self.lock()?;
        let deleted = state.delete(scope, delete_ids);
        let inserted = state.insert(scope, items);
        if deleted > 0 || !inserted.is_empty() {
            state.writes += 1;
        }
        Ok((deleted, inserted))
    }
}

impl CatalogReader for MemoryStore {
    async fn families(&self) -> Result<Vec<CourseFamily>, StoreError> {
        let mut families = self.lock()?.families.clone();
        families.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(families)
    }

    async fn courses(&self, include_inactive: bool) -> Result<Vec<Course>, StoreError> {
        let mut courses: Vec<Course> = self
            .lock()?
            .courses
            .iter()
            .filter(|c| include_inactive || c.active)
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(courses)
    }

    async fn course(&self, course_id: &str) -> Result<Course, StoreError> {
        self.lock()?
            .courses
            .iter()
            .find(|c| c.id == course_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                entity: "course",
                id: course_id.to_string(),
            })
    }

    async fn lessons(
        &self,
        course_id: &str,
        include_inactive: bool,
    ) -> Result<Vec<LessonContent>, StoreError> {
        let mut lessons: Vec<LessonContent> = self
            .lock()?
            .lessons
            .iter()
            .filter(|l| l.course_id == course_id && (include_inactive || l.active))
            .cloned()
            .collect();
        lessons.sort_by(|a, b| a.day_number.cmp(&b.day_number).then_with(|| a.id.cmp(&b.id)));
        Ok(lessons)
    }
}

impl CatalogWriter for MemoryStore {
    async fn import_catalog(&self, seed: &CatalogSeed) -> Result<ImportSummary, StoreError> {
        self.apply_seed(seed)
    }
}
