//! Shared fixtures for repair tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashSet;

use qw_core::{
    CandidateMetadata, Difficulty, DifficultyTier, LessonContent, QuestionCandidate, QuestionType,
    UsageCounters,
};
use qw_generate::{CandidateSource, GenerationRequest};
use qw_store::{CatalogReader, CatalogSeed, MemoryStore, SeedCourse, SeedLesson, SeedQuestion};

pub const COURSE: &str = "prompt-craft-en";
pub const FAMILY: &str = "prompt-craft";
pub const LESSON: &str = "pc-en-01";

pub const RICH_BODY: &str = "## Clear goals\n\
It is important to agree on **a single measurable goal** before a project starts. \
For example, a team that targets ten signed contracts by June can plan backwards. \
You should always write the goal where everyone can see it.\n\
## Review cadence\n\
Weekly reviews keep **progress visible** and let the team adjust early. \
Avoid changing the goal in every meeting, because the plan never settles.";

fn question(text: String, ty: QuestionType) -> SeedQuestion {
    SeedQuestion {
        course_id: COURSE.into(),
        lesson_id: LESSON.into(),
        course_specific: true,
        text,
        options: [
            "Start from the stated goal".into(),
            "Skip the review step".into(),
            "Ask someone else to decide".into(),
            "Wait for more data".into(),
        ],
        correct_index: 0,
        difficulty: Difficulty::Medium,
        question_type: ty,
        hashtags: Vec::new(),
        display_order: None,
        active: true,
        usage: UsageCounters::default(),
    }
}

pub fn app(n: usize) -> SeedQuestion {
    question(
        format!("How would you apply step {n} of the checklist at work?"),
        QuestionType::Application,
    )
}

pub fn ct(n: usize) -> SeedQuestion {
    question(
        format!("Which risk matters most when step {n} is rushed?"),
        QuestionType::CriticalThinking,
    )
}

pub fn recall(n: usize) -> SeedQuestion {
    question(
        format!("What does acronym number {n} stand for?"),
        QuestionType::Recall,
    )
}

pub fn seed_with(body: &str, family: &str, questions: Vec<SeedQuestion>) -> CatalogSeed {
    CatalogSeed {
        families: vec![qw_core::CourseFamily {
            id: family.into(),
            name: "Prompt Craft".into(),
        }],
        courses: vec![SeedCourse {
            id: COURSE.into(),
            family_id: Some(family.into()),
            language: "en".into(),
            title: "Prompt Craft".into(),
            active: true,
        }],
        lessons: vec![SeedLesson {
            id: LESSON.into(),
            course_id: COURSE.into(),
            day_number: 1,
            title: "Clear requests".into(),
            body: body.into(),
            language: None,
            active: true,
        }],
        questions,
    }
}

pub fn store_with(questions: Vec<SeedQuestion>) -> MemoryStore {
    MemoryStore::from_seed(&seed_with(RICH_BODY, FAMILY, questions)).unwrap()
}

pub async fn lesson(store: &MemoryStore) -> LessonContent {
    store.lessons(COURSE, false).await.unwrap().remove(0)
}

/// Deterministic source: `requested` candidates per call, alternating
/// application / critical thinking, unique per seed. Counts calls.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pub calls: Cell<usize>,
    pub silent: bool,
}

impl ScriptedSource {
    pub fn silent() -> Self {
        Self {
            calls: Cell::new(0),
            silent: true,
        }
    }
}

impl CandidateSource for ScriptedSource {
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
        existing: &HashSet<String>,
        requested: usize,
        seed: u64,
    ) -> Vec<QuestionCandidate> {
        self.calls.set(self.calls.get() + 1);
        if self.silent {
            return Vec::new();
        }
        (0..requested)
            .map(|i| {
                let ty = if i % 2 == 0 {
                    QuestionType::Application
                } else {
                    QuestionType::CriticalThinking
                };
                let metadata = CandidateMetadata {
                    day: request.day_number,
                    language: request.language.into(),
                    course_family: request.course_family.into(),
                    tier: DifficultyTier::for_day(request.day_number),
                    question_type: ty,
                    strategy: "scripted".into(),
                };
                QuestionCandidate {
                    text: format!("How would you handle scripted case {seed:016x}-{i} today?"),
                    options: [
                        format!("Start from the goal in case {i}"),
                        "Skip the review step".into(),
                        "Ask someone else to decide".into(),
                        "Wait for more data".into(),
                    ],
                    correct_index: u8::try_from(i % 4).unwrap(),
                    difficulty: Difficulty::Medium,
                    question_type: ty,
                    hashtags: metadata.hashtags(),
                    metadata,
                }
            })
            .filter(|c| !existing.contains(&c.normalized_text()))
            .collect()
    }
}
