//! Shared fixtures for audit tests.

#![allow(dead_code)]

use std::collections::HashSet;

use qw_core::{
    CandidateMetadata, CourseFamily, Difficulty, DifficultyTier, LessonContent,
    QuestionCandidate, QuestionType, UsageCounters,
};
use qw_generate::{CandidateSource, GenerationRequest};
use qw_oracle::{ContentQualityOracle, ContentScore};
use qw_store::{CatalogSeed, SeedCourse, SeedLesson, SeedQuestion};

pub const BODY: &str = "## Clear goals\n\
It is important to agree on **a single measurable goal** before a project starts. \
For example, a team that targets ten signed contracts by June can plan backwards. \
You should always write the goal where everyone can see it.";

pub fn family(id: &str, name: &str) -> CourseFamily {
    CourseFamily {
        id: id.into(),
        name: name.into(),
    }
}

pub fn course(id: &str, family_id: Option<&str>, language: &str) -> SeedCourse {
    SeedCourse {
        id: id.into(),
        family_id: family_id.map(String::from),
        language: language.into(),
        title: id.to_uppercase(),
        active: true,
    }
}

pub fn lesson(id: &str, course_id: &str, day: u32) -> SeedLesson {
    SeedLesson {
        id: id.into(),
        course_id: course_id.into(),
        day_number: day,
        title: format!("Day {day}"),
        body: BODY.into(),
        language: None,
        active: true,
    }
}

fn question(lesson: &SeedLesson, text: String, ty: QuestionType) -> SeedQuestion {
    SeedQuestion {
        course_id: lesson.course_id.clone(),
        lesson_id: lesson.id.clone(),
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

pub fn app(lesson: &SeedLesson, n: usize) -> SeedQuestion {
    question(
        lesson,
        format!("How would you apply step {n} of the checklist at work?"),
        QuestionType::Application,
    )
}

pub fn ct(lesson: &SeedLesson, n: usize) -> SeedQuestion {
    question(
        lesson,
        format!("Which risk matters most when step {n} is rushed?"),
        QuestionType::CriticalThinking,
    )
}

pub fn recall(lesson: &SeedLesson, n: usize) -> SeedQuestion {
    question(
        lesson,
        format!("What does acronym number {n} stand for?"),
        QuestionType::Recall,
    )
}

pub fn statement(lesson: &SeedLesson, n: usize) -> SeedQuestion {
    question(
        lesson,
        format!("Describe step {n} of the checklist in your own words."),
        QuestionType::Application,
    )
}

/// Five application and two critical-thinking questions.
pub fn compliant_pool(lesson: &SeedLesson) -> Vec<SeedQuestion> {
    let mut pool: Vec<SeedQuestion> = (1..=5).map(|n| app(lesson, n)).collect();
    pool.extend((1..=2).map(|n| ct(lesson, n)));
    pool
}

pub fn seed(
    families: Vec<CourseFamily>,
    courses: Vec<SeedCourse>,
    lessons: Vec<SeedLesson>,
    questions: Vec<SeedQuestion>,
) -> CatalogSeed {
    CatalogSeed {
        families,
        courses,
        lessons,
        questions,
    }
}

/// Alternating application / critical-thinking candidates, unique per seed.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pub silent: bool,
}

impl CandidateSource for ScriptedSource {
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
        existing: &HashSet<String>,
        requested: usize,
        seed: u64,
    ) -> Vec<QuestionCandidate> {
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

/// Scores every lesson the same.
#[derive(Debug, Clone, Copy)]
pub struct FixedScore(pub u8);

impl ContentQualityOracle for FixedScore {
    fn score(&self, _lesson: &LessonContent) -> ContentScore {
        ContentScore {
            score: self.0,
            notes: vec![format!("fixed at {}", self.0)],
        }
    }
}
