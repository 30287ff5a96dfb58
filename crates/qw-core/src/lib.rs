//! # qw-core
//!
//! Core types, quota policy, and error types for quizwright.
//!
//! This crate provides the foundational types shared across all quizwright crates:
//! - Catalog entities (course families, courses, lessons)
//! - Question entities (generated candidates and persisted questions)
//! - Question type, difficulty, and finding-code enums
//! - Quota targets, type counts, and deficit arithmetic
//! - Question text normalization used as the only duplicate test
//! - Writing-script detection for language-integrity checks
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod normalize;
pub mod quota;
pub mod script;

pub use entities::{
    CandidateMetadata, Course, CourseFamily, LessonContent, PersistedQuestion, QuestionCandidate,
    UsageCounters, infer_family,
};
pub use enums::{Difficulty, DifficultyTier, FindingCode, QuestionType};
pub use errors::CoreError;
pub use normalize::normalize_question_text;
pub use quota::{Deficits, QuotaTarget, TypeCounts};
pub use script::Script;
