//! Extractor-driven template strategy; matches every lesson.

use qw_core::QuestionType;
use qw_extract::{ConceptExtractor, Concepts, plain_text};

use crate::GenerationRequest;
use crate::draft::Draft;
use crate::strategy::GenerationStrategy;
use crate::templates::LanguageTemplates;

/// Longest signal used verbatim inside a question stem.
const MAX_ANCHOR_WORDS: usize = 8;

pub const GENERIC_STRATEGY: &str = "generic";

#[derive(Debug, Clone)]
pub struct GenericStrategy {
    extractor: ConceptExtractor,
    min_content_chars: usize,
}

impl GenericStrategy {
    #[must_use]
    pub const fn new(extractor: ConceptExtractor, min_content_chars: usize) -> Self {
        Self {
            extractor,
            min_content_chars,
        }
    }
}

impl GenerationStrategy for GenericStrategy {
    fn name(&self) -> &str {
        GENERIC_STRATEGY
    }

    fn matches(&self, _request: &GenerationRequest<'_>) -> bool {
        true
    }

    fn drafts(
        &self,
        request: &GenerationRequest<'_>,
        templates: &dyn LanguageTemplates,
    ) -> Vec<Draft> {
        let length = plain_text(request.content).chars().count();
        if length < self.min_content_chars {
            tracing::debug!(
                course = request.course_id,
                day = request.day_number,
                length,
                min = self.min_content_chars,
                "lesson content too short for generic strategy"
            );
            return Vec::new();
        }

        let concepts = self
            .extractor
            .extract(request.title, request.content, request.language);
        let mut drafts = critical_thinking_drafts(request, templates, &concepts);
        drafts.extend(application_drafts(request, templates, &concepts));
        drafts
    }
}

/// Every principle crossed with every constraint; risks rotate so each
/// pairing names a different one.
fn critical_thinking_drafts(
    request: &GenerationRequest<'_>,
    templates: &dyn LanguageTemplates,
    concepts: &Concepts,
) -> Vec<Draft> {
    let principles = anchors(concepts.main_topics.iter().chain(&concepts.key_terms));
    let constraints = templates.constraints();
    let risks = templates.risks();
    if risks.is_empty() {
        return Vec::new();
    }

    let mut drafts = Vec::new();
    for (i, principle) in principles.iter().enumerate() {
        for (j, constraint) in constraints.iter().enumerate() {
            let risk = risks[(i + j) % risks.len()];
            drafts.push(Draft::from_template(
                templates.critical_thinking(principle, constraint, risk),
                QuestionType::CriticalThinking,
                request.day_number,
            ));
        }
    }
    drafts
}

/// Terms and short practices crossed with lesson examples and stock scenarios.
fn application_drafts(
    request: &GenerationRequest<'_>,
    templates: &dyn LanguageTemplates,
    concepts: &Concepts,
) -> Vec<Draft> {
    let anchors = anchors(
        concepts
            .key_terms
            .iter()
            .chain(&concepts.practices)
            .chain(&concepts.main_topics),
    );
    let scenarios: Vec<String> = concepts
        .examples
        .iter()
        .map(|example| templates.lesson_scenario(&as_sentence(example)))
        .chain(templates.scenarios().iter().map(|s| (*s).to_string()))
        .collect();

    let mut drafts = Vec::new();
    for anchor in &anchors {
        for scenario in &scenarios {
            drafts.push(Draft::from_template(
                templates.application(anchor, scenario),
                QuestionType::Application,
                request.day_number,
            ));
        }
    }
    drafts
}

/// Short, de-punctuated signals suitable for quoting inside a stem.
fn anchors<'a, I>(signals: I) -> Vec<String>
where
    I: Iterator<Item = &'a String>,
{
    let mut out: Vec<String> = Vec::new();
    for signal in signals {
        let anchor = signal
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_punctuation() || c == '…')
            .trim();
        let words = anchor.split_whitespace().count();
        if words == 0 || words > MAX_ANCHOR_WORDS {
            continue;
        }
        let key = anchor.to_lowercase();
        if !out.iter().any(|a| a.to_lowercase() == key) {
            out.push(anchor.to_string());
        }
    }
    out
}

fn as_sentence(example: &str) -> String {
    let trimmed = example.trim().trim_end_matches('…').trim_end();
    if trimmed.ends_with(['.', '!', '?', '。']) {
        trimmed.to_string()
    } else {
        format!("{trimmed}.")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::templates::English;

    fn request(content: &str) -> GenerationRequest<'_> {
        GenerationRequest {
            day_number: 2,
            title: "Giving feedback",
            content,
            language: "en",
            course_id: "soft-skills-en",
            course_family: "soft-skills",
        }
    }

    #[test]
    fn short_content_yields_nothing() {
        let strategy = GenericStrategy::new(ConceptExtractor::default(), 200);
        assert!(strategy.drafts(&request("Too short."), &English).is_empty());
    }

    #[test]
    fn drafts_cover_both_types() {
        let body = "## Specific feedback\nIt is important to describe **observable behaviour** \
                    rather than intent. For example, point to the slide that confused the client. \
                    You should always offer **one next step**. Vague praise feels kind but does \
                    not help anyone improve, and people remember concrete advice far longer.";
        let strategy = GenericStrategy::new(ConceptExtractor::default(), 100);
        let drafts = strategy.drafts(&request(body), &English);

        let ct = drafts
            .iter()
            .filter(|d| d.question_type == QuestionType::CriticalThinking)
            .count();
        let app = drafts.len() - ct;
        // 3 principles × 5 constraints; 4 anchors × (1 lesson example + 5 stock scenarios)
        assert_eq!(ct, 15);
        assert_eq!(app, 24);
        assert!(
            drafts
                .iter()
                .any(|d| d.text.contains("Consider this situation: point to the slide"))
        );
    }

    #[test]
    fn anchors_skip_long_and_repeated_signals() {
        let signals = vec![
            "Role".to_string(),
            "role".to_string(),
            "a sentence that is clearly far too long to quote inside a stem".to_string(),
            "Output format.".to_string(),
        ];
        assert_eq!(anchors(signals.iter()), vec!["Role", "Output format"]);
    }

    #[test]
    fn sentence_gets_terminal_punctuation() {
        assert_eq!(as_sentence("a quick check"), "a quick check.");
        assert_eq!(as_sentence("Done!"), "Done!");
    }
}
