//! Catalog seed files.
//!
//! A seed carries families, courses, lessons, and optionally pre-existing
//! questions. TOML and JSON are accepted; the format follows the extension.
//!
//! ```toml
//! [[families]]
//! id = "prompt-craft"
//! name = "Prompt Craft"
//!
//! [[courses]]
//! id = "prompt-craft-en"
//! family_id = "prompt-craft"
//! language = "en"
//! title = "Prompt Craft"
//!
//! [[lessons]]
//! id = "pc-en-01"
//! course_id = "prompt-craft-en"
//! day_number = 1
//! title = "Clear requests"
//! body = "..."
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use qw_core::{Course, CourseFamily, Difficulty, LessonContent, QuestionType, UsageCounters};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::gateway::{LessonScope, NewQuestion};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCourse {
    pub id: String,
    #[serde(default)]
    pub family_id: Option<String>,
    pub language: String,
    pub title: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedLesson {
    pub id: String,
    pub course_id: String,
    pub day_number: u32,
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Defaults to the course language.
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedQuestion {
    pub course_id: String,
    pub lesson_id: String,
    #[serde(default = "default_true")]
    pub course_specific: bool,
    pub text: String,
    pub options: [String; 4],
    pub correct_index: u8,
    pub difficulty: Difficulty,
    #[serde(rename = "type", alias = "question_type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Defaults to the question's position within its lesson in the seed.
    #[serde(default)]
    pub display_order: Option<u32>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub usage: UsageCounters,
}

/// Parsed catalog seed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub families: Vec<CourseFamily>,
    #[serde(default)]
    pub courses: Vec<SeedCourse>,
    #[serde(default)]
    pub lessons: Vec<SeedLesson>,
    #[serde(default)]
    pub questions: Vec<SeedQuestion>,
}

impl CatalogSeed {
    /// Read a seed file, choosing JSON for `.json` and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SeedIo` if the file cannot be read and
    /// `StoreError::Seed` if it does not parse or fails validation.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let source = std::fs::read_to_string(path).map_err(|source| StoreError::SeedIo {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&source, path)
        } else {
            Self::from_toml_str(&source, path)
        }
    }

    /// # Errors
    ///
    /// Returns `StoreError::Seed` if the source does not parse or validate.
    pub fn from_toml_str(source: &str, origin: &Path) -> Result<Self, StoreError> {
        let seed: Self = toml::from_str(source).map_err(|e| seed_error(origin, e.to_string()))?;
        seed.validate(origin)?;
        Ok(seed)
    }

    /// # Errors
    ///
    /// Returns `StoreError::Seed` if the source does not parse or validate.
    pub fn from_json_str(source: &str, origin: &Path) -> Result<Self, StoreError> {
        let seed: Self =
            serde_json::from_str(source).map_err(|e| seed_error(origin, e.to_string()))?;
        seed.validate(origin)?;
        Ok(seed)
    }

    fn validate(&self, origin: &Path) -> Result<(), StoreError> {
        for family in &self.families {
            if family.id.trim().is_empty() {
                return Err(seed_error(origin, "family with empty id".into()));
            }
        }
        for course in &self.courses {
            if course.id.trim().is_empty() {
                return Err(seed_error(origin, "course with empty id".into()));
            }
        }
        for lesson in &self.lessons {
            if lesson.id.trim().is_empty() || lesson.course_id.trim().is_empty() {
                return Err(seed_error(
                    origin,
                    format!("lesson '{}' needs an id and a course_id", lesson.id),
                ));
            }
            if lesson.day_number == 0 {
                return Err(seed_error(
                    origin,
                    format!("lesson '{}' has day_number 0", lesson.id),
                ));
            }
        }
        for question in &self.questions {
            if question.correct_index > 3 {
                return Err(seed_error(
                    origin,
                    format!(
                        "question '{}' has correct_index {}",
                        question.text, question.correct_index
                    ),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn course_entities(&self) -> Vec<Course> {
        self.courses
            .iter()
            .map(|c| Course {
                id: c.id.clone(),
                family_id: c.family_id.clone(),
                language: c.language.clone(),
                title: c.title.clone(),
                active: c.active,
            })
            .collect()
    }

    /// Lessons with their language resolved against `known_languages`
    /// (course id → language) and the seed's own courses.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidState` when a lesson has no language and its
    /// course is unknown.
    pub fn lesson_entities(
        &self,
        known_languages: &HashMap<String, String>,
    ) -> Result<Vec<LessonContent>, StoreError> {
        let seeded: HashMap<&str, &str> = self
            .courses
            .iter()
            .map(|c| (c.id.as_str(), c.language.as_str()))
            .collect();
        self.lessons
            .iter()
            .map(|l| {
                let language = match &l.language {
                    Some(lang) => lang.clone(),
                    None => seeded
                        .get(l.course_id.as_str())
                        .map(|s| (*s).to_string())
                        .or_else(|| known_languages.get(&l.course_id).cloned())
                        .ok_or_else(|| {
                            StoreError::InvalidState(format!(
                                "lesson '{}' has no language and course '{}' is unknown",
                                l.id, l.course_id
                            ))
                        })?,
                };
                Ok(LessonContent {
                    id: l.id.clone(),
                    course_id: l.course_id.clone(),
                    day_number: l.day_number,
                    title: l.title.clone(),
                    body: l.body.clone(),
                    language,
                    active: l.active,
                })
            })
            .collect()
    }

    /// Seeded questions grouped by scope, in first-appearance order.
    #[must_use]
    pub fn question_groups(&self) -> Vec<(LessonScope, Vec<NewQuestion>)> {
        let mut groups: Vec<(LessonScope, Vec<NewQuestion>)> = Vec::new();
        for q in &self.questions {
            let scope = LessonScope {
                course_id: q.course_id.clone(),
                lesson_id: q.lesson_id.clone(),
                course_specific: q.course_specific,
            };
            let slot = match groups.iter().position(|(s, _)| *s == scope) {
                Some(i) => i,
                None => {
                    groups.push((scope, Vec::new()));
                    groups.len() - 1
                }
            };
            let items = &mut groups[slot].1;
            let position = u32::try_from(items.len() + 1).unwrap_or(u32::MAX);
            items.push(NewQuestion {
                text: q.text.clone(),
                options: q.options.clone(),
                correct_index: q.correct_index,
                difficulty: q.difficulty,
                question_type: q.question_type,
                hashtags: q.hashtags.clone(),
                display_order: q.display_order.unwrap_or(position),
                active: q.active,
                usage: q.usage,
            });
        }
        groups
    }
}

fn seed_error(origin: &Path, reason: String) -> StoreError {
    StoreError::Seed {
        path: PathBuf::from(origin),
        reason,
    }
}
