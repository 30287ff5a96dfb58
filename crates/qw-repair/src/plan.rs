//! Mutations a repair run intends to make, committed as one unit.

use qw_core::PersistedQuestion;
use qw_store::NewQuestion;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalReason {
    /// Oracle-invalid, removed by the shortcut path.
    Invalid,
    /// Repeats the normalized text of a lower-id question.
    Duplicate,
    /// Superseded by a replacement in the same display slot.
    Replaced,
    /// Invalid and no replacement was found within the round limit.
    ReplacementExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removal {
    pub id: i64,
    pub display_order: u32,
    pub text: String,
    pub reason: RemovalReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insertion {
    pub question: NewQuestion,
    /// Id of the question whose slot this one takes, if any.
    pub replaces: Option<i64>,
    /// Generation strategy that produced the candidate.
    pub strategy: String,
}

/// Ordered removals and insertions for one lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MutationPlan {
    pub removals: Vec<Removal>,
    pub insertions: Vec<Insertion>,
}

impl MutationPlan {
    pub fn remove(&mut self, question: &PersistedQuestion, reason: RemovalReason) {
        self.removals.push(Removal {
            id: question.id,
            display_order: question.display_order,
            text: question.text.clone(),
            reason,
        });
    }

    pub fn replace(&mut self, old: &PersistedQuestion, new: NewQuestion, strategy: &str) {
        self.remove(old, RemovalReason::Replaced);
        self.insertions.push(Insertion {
            question: new,
            replaces: Some(old.id),
            strategy: strategy.to_string(),
        });
    }

    pub fn append(&mut self, new: NewQuestion, strategy: &str) {
        self.insertions.push(Insertion {
            question: new,
            replaces: None,
            strategy: strategy.to_string(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.insertions.is_empty()
    }

    #[must_use]
    pub fn delete_ids(&self) -> Vec<i64> {
        self.removals.iter().map(|r| r.id).collect()
    }

    #[must_use]
    pub fn new_items(&self) -> Vec<NewQuestion> {
        self.insertions.iter().map(|i| i.question.clone()).collect()
    }

    /// Insertions that took over an existing slot.
    #[must_use]
    pub fn replaced(&self) -> usize {
        self.insertions.iter().filter(|i| i.replaces.is_some()).count()
    }

    /// Insertions appended by the fill phase.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.insertions.iter().filter(|i| i.replaces.is_none()).count()
    }

    /// Removals that leave their slot empty.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.removals
            .iter()
            .filter(|r| r.reason != RemovalReason::Replaced)
            .count()
    }
}
