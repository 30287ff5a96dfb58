//! Lesson-scoped accumulator of accepted question texts and type counts.

use std::collections::HashSet;

use qw_core::{PersistedQuestion, QuestionType, TypeCounts, normalize_question_text};

/// Normalized texts and type counts of everything accepted so far in one lesson.
///
/// Selection steps take the set by reference and return an extended copy, so
/// each phase's input is explicit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptedSet {
    keys: HashSet<String>,
    counts: TypeCounts,
}

impl AcceptedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_questions<'a, I>(questions: I) -> Self
    where
        I: IntoIterator<Item = &'a PersistedQuestion>,
    {
        questions
            .into_iter()
            .fold(Self::new(), |set, q| set.with(&q.text, q.question_type))
    }

    /// This set plus one more accepted question.
    #[must_use]
    pub fn with(mut self, text: &str, question_type: QuestionType) -> Self {
        if self.keys.insert(normalize_question_text(text)) {
            self.counts.add(question_type);
        }
        self
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.keys.contains(&normalize_question_text(text))
    }

    /// Normalized keys, in the form the generator expects for exclusion.
    #[must_use]
    pub const fn keys(&self) -> &HashSet<String> {
        &self.keys
    }

    #[must_use]
    pub const fn counts(&self) -> TypeCounts {
        self.counts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
