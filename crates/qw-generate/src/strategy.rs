//! Ranked strategy registry.

use std::sync::Arc;

use crate::GenerationRequest;
use crate::draft::Draft;
use crate::templates::LanguageTemplates;

/// A source of drafts for the lessons it matches.
pub trait GenerationStrategy: Send + Sync {
    /// Name recorded in candidate metadata.
    fn name(&self) -> &str;

    fn matches(&self, request: &GenerationRequest<'_>) -> bool;

    /// Every draft the strategy can offer for `request`, in a stable order.
    /// Permutation and selection happen in the generator.
    fn drafts(
        &self,
        request: &GenerationRequest<'_>,
        templates: &dyn LanguageTemplates,
    ) -> Vec<Draft>;

    /// Items returned beyond the requested count.
    fn surplus(&self) -> usize {
        0
    }
}

struct Ranked {
    rank: u32,
    strategy: Arc<dyn GenerationStrategy>,
}

/// Strategies ordered by rank, with an always-last fallback.
///
/// Higher ranks are tried first; equal ranks keep registration order.
pub struct StrategyRegistry {
    ranked: Vec<Ranked>,
    fallback: Arc<dyn GenerationStrategy>,
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field(
                "ranked",
                &self
                    .ranked
                    .iter()
                    .map(|r| (r.rank, r.strategy.name()))
                    .collect::<Vec<_>>(),
            )
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl StrategyRegistry {
    #[must_use]
    pub fn new(fallback: Arc<dyn GenerationStrategy>) -> Self {
        Self {
            ranked: Vec::new(),
            fallback,
        }
    }

    pub fn register(&mut self, rank: u32, strategy: Arc<dyn GenerationStrategy>) {
        let at = self.ranked.partition_point(|r| r.rank >= rank);
        self.ranked.insert(at, Ranked { rank, strategy });
    }

    /// Strategies matching `request`, best first, fallback last.
    pub fn matching<'a>(
        &'a self,
        request: &'a GenerationRequest<'a>,
    ) -> impl Iterator<Item = &'a dyn GenerationStrategy> + 'a {
        self.ranked
            .iter()
            .map(|r| &*r.strategy)
            .chain(std::iter::once(&*self.fallback))
            .filter(move |s| s.matches(request))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Named {
        name: &'static str,
        day: Option<u32>,
    }

    impl GenerationStrategy for Named {
        fn name(&self) -> &str {
            self.name
        }

        fn matches(&self, request: &GenerationRequest<'_>) -> bool {
            self.day.is_none_or(|d| d == request.day_number)
        }

        fn drafts(&self, _: &GenerationRequest<'_>, _: &dyn LanguageTemplates) -> Vec<Draft> {
            Vec::new()
        }
    }

    fn named(name: &'static str, day: Option<u32>) -> Arc<dyn GenerationStrategy> {
        Arc::new(Named { name, day })
    }

    fn request(day: u32) -> GenerationRequest<'static> {
        GenerationRequest {
            day_number: day,
            title: "t",
            content: "",
            language: "en",
            course_id: "c",
            course_family: "f",
        }
    }

    #[test]
    fn rank_then_registration_order_then_fallback() {
        let mut registry = StrategyRegistry::new(named("generic", None));
        registry.register(10, named("low", None));
        registry.register(50, named("high-a", None));
        registry.register(50, named("high-b", None));
        registry.register(20, named("day-3-only", Some(3)));

        let req = request(1);
        let names: Vec<_> = registry.matching(&req).map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["high-a", "high-b", "low", "generic"]);

        let req = request(3);
        let names: Vec<_> = registry.matching(&req).map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["high-a", "high-b", "day-3-only", "low", "generic"]);
    }
}
