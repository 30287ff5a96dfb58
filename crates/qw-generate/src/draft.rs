//! Strategy output before selection, and its conversion into candidates.

use std::collections::HashSet;

use qw_core::{
    CandidateMetadata, Difficulty, DifficultyTier, QuestionCandidate, QuestionType,
    normalize_question_text,
};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::GenerationRequest;
use crate::plan::QuotaPlan;
use crate::templates::TemplateDraft;

/// An unshuffled question as a strategy produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub correct: String,
    pub distractors: [String; 3],
    pub question_type: QuestionType,
    pub difficulty: Difficulty,
}

impl Draft {
    #[must_use]
    pub fn from_template(template: TemplateDraft, question_type: QuestionType, day: u32) -> Self {
        Self {
            text: template.stem,
            correct: template.correct,
            distractors: template.distractors,
            question_type,
            difficulty: difficulty_for(DifficultyTier::for_day(day), question_type),
        }
    }

    /// Shuffle the options and attach metadata.
    pub(crate) fn into_candidate<R: Rng>(
        self,
        request: &GenerationRequest<'_>,
        strategy: &str,
        rng: &mut R,
    ) -> QuestionCandidate {
        let [d1, d2, d3] = self.distractors;
        let mut slots = [Some(self.correct), Some(d1), Some(d2), Some(d3)];
        let mut order = [0usize, 1, 2, 3];
        order.shuffle(rng);

        let correct_index = order
            .iter()
            .position(|&i| i == 0)
            .and_then(|pos| u8::try_from(pos).ok())
            .unwrap_or(0);
        let options = order.map(|i| slots[i].take().unwrap_or_default());

        let metadata = CandidateMetadata {
            day: request.day_number,
            language: request.language.to_string(),
            course_family: request.course_family.to_string(),
            tier: DifficultyTier::for_day(request.day_number),
            question_type: self.question_type,
            strategy: strategy.to_string(),
        };

        QuestionCandidate {
            text: self.text,
            options,
            correct_index,
            difficulty: self.difficulty,
            question_type: self.question_type,
            hashtags: metadata.hashtags(),
            metadata,
        }
    }
}

/// Default difficulty for a generated type at a curriculum stage.
#[must_use]
pub const fn difficulty_for(tier: DifficultyTier, ty: QuestionType) -> Difficulty {
    match (tier, ty) {
        (DifficultyTier::Foundation, QuestionType::CriticalThinking)
        | (DifficultyTier::Intermediate, _) => Difficulty::Medium,
        (DifficultyTier::Foundation, _) => Difficulty::Easy,
        (DifficultyTier::Advanced, _) => Difficulty::Hard,
    }
}

/// Permute `drafts` and pick a batch that honours `plan` first.
///
/// Drafts whose normalized text is in `existing`, repeats within the pool,
/// and recall items are dropped. After the plan's slots are filled, up to
/// `surplus` leftovers of any generated type follow.
pub(crate) fn select<R: Rng>(
    mut drafts: Vec<Draft>,
    plan: QuotaPlan,
    surplus: usize,
    existing: &HashSet<String>,
    rng: &mut R,
) -> Vec<Draft> {
    drafts.shuffle(rng);

    let mut seen = HashSet::new();
    let mut open = plan;
    let mut picked = Vec::new();
    let mut leftovers = Vec::new();

    for draft in drafts {
        if draft.question_type == QuestionType::Recall {
            continue;
        }
        let key = normalize_question_text(&draft.text);
        if key.is_empty() || existing.contains(&key) || !seen.insert(key) {
            continue;
        }
        if open.take(draft.question_type) {
            picked.push(draft);
        } else {
            leftovers.push(draft);
        }
    }

    let cap = plan.total() + surplus;
    let room = cap.saturating_sub(picked.len());
    picked.extend(leftovers.into_iter().take(room));
    picked
}
