//! Per-lesson quota target, type counts, and deficit arithmetic.

use serde::{Deserialize, Serialize};

use crate::enums::QuestionType;

/// Required composition of one lesson's active question pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaTarget {
    pub total_min: usize,
    pub application_min: usize,
    pub critical_thinking_min: usize,
    pub recall_max: usize,
}

impl Default for QuotaTarget {
    fn default() -> Self {
        Self {
            total_min: 7,
            application_min: 5,
            critical_thinking_min: 2,
            recall_max: 0,
        }
    }
}

impl QuotaTarget {
    /// Whether `counts` meets every minimum and the recall ceiling.
    #[must_use]
    pub const fn is_satisfied(&self, counts: &TypeCounts) -> bool {
        counts.total() >= self.total_min
            && counts.application >= self.application_min
            && counts.critical_thinking >= self.critical_thinking_min
            && counts.recall <= self.recall_max
    }

    /// Remaining shortfall for `counts`. Recall never contributes toward any minimum.
    #[must_use]
    pub fn deficits(&self, counts: &TypeCounts) -> Deficits {
        let application = self.application_min.saturating_sub(counts.application);
        let critical_thinking = self
            .critical_thinking_min
            .saturating_sub(counts.critical_thinking);
        let counted = counts.application + counts.critical_thinking;
        let total = self
            .total_min
            .saturating_sub(counted)
            .max(application + critical_thinking);
        Deficits {
            total,
            application,
            critical_thinking,
        }
    }
}

/// Counts of questions by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub application: usize,
    pub critical_thinking: usize,
    pub recall: usize,
}

impl TypeCounts {
    /// Tally an iterator of question types.
    pub fn tally<I: IntoIterator<Item = QuestionType>>(types: I) -> Self {
        let mut counts = Self::default();
        for ty in types {
            counts.add(ty);
        }
        counts
    }

    pub const fn add(&mut self, ty: QuestionType) {
        match ty {
            QuestionType::Application => self.application += 1,
            QuestionType::CriticalThinking => self.critical_thinking += 1,
            QuestionType::Recall => self.recall += 1,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.application + self.critical_thinking + self.recall
    }
}

/// Shortfall against a [`QuotaTarget`].
///
/// `total` is never smaller than `application + critical_thinking`: a pool of
/// ten application questions with no critical-thinking ones still has a total
/// deficit of two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deficits {
    pub total: usize,
    pub application: usize,
    pub critical_thinking: usize,
}

impl Deficits {
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.total == 0 && self.application == 0 && self.critical_thinking == 0
    }

    /// The type the next accepted question should have, or `None` when done.
    ///
    /// The larger typed deficit wins; ties go to critical thinking, the scarcer
    /// type in generated batches. When only the untyped total remains,
    /// application questions fill it.
    #[must_use]
    pub const fn most_urgent(&self) -> Option<QuestionType> {
        if self.critical_thinking > 0 && self.critical_thinking >= self.application {
            Some(QuestionType::CriticalThinking)
        } else if self.application > 0 || self.total > 0 {
            Some(QuestionType::Application)
        } else {
            None
        }
    }
}
