//! # qw-generate
//!
//! Seeded candidate question generation for quizwright.
//!
//! A [`CandidateGenerator`] dispatches each request through a ranked
//! [`StrategyRegistry`]: bespoke [`QuestionBank`]s registered for specific
//! (course family, language, day) combinations first, then the
//! extractor-driven [`GenericStrategy`], which matches every lesson. The first
//! matching strategy that yields anything wins.
//!
//! The batch composition follows [`plan_for`]. All randomness comes from one
//! `StdRng` seeded per call, so a given seed always reproduces the same batch
//! while different seeds permute the pool differently.

mod bank;
mod draft;
mod error;
mod generic;
mod plan;
mod strategy;
pub mod templates;

pub use bank::{BankQuestion, BankStrategy, QuestionBank, builtin_banks, load_dir};
pub use draft::{Draft, difficulty_for};
pub use error::GenerateError;
pub use generic::{GENERIC_STRATEGY, GenericStrategy};
pub use plan::{QuotaPlan, plan_for};
pub use strategy::{GenerationStrategy, StrategyRegistry};
pub use templates::{LanguageTemplates, TemplateRegistry};

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use qw_config::GeneratorConfig;
use qw_core::{LessonContent, QuestionCandidate};
use qw_extract::ConceptExtractor;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Everything the generator knows about the lesson it is generating for.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub day_number: u32,
    pub title: &'a str,
    pub content: &'a str,
    pub language: &'a str,
    pub course_id: &'a str,
    /// Family used for bank dispatch and metadata.
    pub course_family: &'a str,
}

impl<'a> GenerationRequest<'a> {
    #[must_use]
    pub fn for_lesson(lesson: &'a LessonContent, course_family: &'a str) -> Self {
        Self {
            day_number: lesson.day_number,
            title: &lesson.title,
            content: &lesson.body,
            language: &lesson.language,
            course_id: &lesson.course_id,
            course_family,
        }
    }
}

/// Anything that can produce candidate batches.
///
/// `existing` holds normalized texts already accepted in the lesson; no
/// returned candidate repeats one of them or another candidate in the batch.
pub trait CandidateSource {
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
        existing: &HashSet<String>,
        requested: usize,
        seed: u64,
    ) -> Vec<QuestionCandidate>;
}

/// The production generator: template registry plus ranked strategies.
#[derive(Debug)]
pub struct CandidateGenerator {
    templates: TemplateRegistry,
    strategies: StrategyRegistry,
}

impl CandidateGenerator {
    #[must_use]
    pub const fn new(templates: TemplateRegistry, strategies: StrategyRegistry) -> Self {
        Self {
            templates,
            strategies,
        }
    }

    /// Generator with built-in templates and banks, plus every bank found in
    /// `config.bank_dirs`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError` if a configured bank directory cannot be read
    /// or holds an invalid bank.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        let generic = GenericStrategy::new(ConceptExtractor::default(), config.min_content_chars);
        let mut strategies = StrategyRegistry::new(Arc::new(generic));

        let mut banks = builtin_banks()?;
        for dir in &config.bank_dirs {
            banks.extend(load_dir(Path::new(dir))?);
        }
        for bank in banks {
            let strategy = BankStrategy::new(bank, config.bespoke_pool_surplus);
            strategies.register(strategy.rank(), Arc::new(strategy));
        }

        Ok(Self::new(TemplateRegistry::builtin(), strategies))
    }
}

impl CandidateSource for CandidateGenerator {
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
        existing: &HashSet<String>,
        requested: usize,
        seed: u64,
    ) -> Vec<QuestionCandidate> {
        if requested == 0 {
            return Vec::new();
        }
        let templates = self.templates.resolve(request.language);
        let plan = plan_for(requested);
        let mut rng = StdRng::seed_from_u64(seed);

        for strategy in self.strategies.matching(request) {
            let drafts = strategy.drafts(request, templates);
            let picked = draft::select(drafts, plan, strategy.surplus(), existing, &mut rng);
            if picked.is_empty() {
                tracing::debug!(
                    strategy = strategy.name(),
                    course = request.course_id,
                    day = request.day_number,
                    "strategy produced nothing new, trying next"
                );
                continue;
            }
            tracing::debug!(
                strategy = strategy.name(),
                course = request.course_id,
                day = request.day_number,
                seed,
                count = picked.len(),
                "generated candidates"
            );
            return picked
                .into_iter()
                .map(|d| d.into_candidate(request, strategy.name(), &mut rng))
                .collect();
        }

        tracing::debug!(
            course = request.course_id,
            day = request.day_number,
            "no strategy produced candidates"
        );
        Vec::new()
    }
}
