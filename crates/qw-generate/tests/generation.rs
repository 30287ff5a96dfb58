//! Generator behaviour across strategies, seeds, and languages.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use qw_config::GeneratorConfig;
use qw_core::{QuestionType, Script};
use qw_generate::{CandidateGenerator, CandidateSource, GENERIC_STRATEGY, GenerationRequest};

const LESSON: &str = "## Clear goals\n\
It is important to agree on **a single measurable goal** before a project starts. \
For example, a team that targets ten signed contracts by June can plan backwards. \
You should always write the goal where everyone can see it.\n\
## Review cadence\n\
Weekly reviews keep **progress visible** and let the team adjust early. \
Avoid changing the goal in every meeting, because the plan never settles.";

const RU_LESSON: &str = "## Обратная связь\n\
Важно описывать **конкретное поведение**, а не намерения человека. \
Например, укажите на слайд, который запутал клиента. \
Всегда предлагайте **один следующий шаг**, чтобы разговор закончился действием. \
Расплывчатая похвала приятна, но не помогает человеку расти и меняться.";

fn generator() -> CandidateGenerator {
    CandidateGenerator::from_config(&GeneratorConfig::default()).expect("built-in banks load")
}

fn request<'a>(content: &'a str, language: &'a str, family: &'a str, day: u32) -> GenerationRequest<'a> {
    GenerationRequest {
        day_number: day,
        title: "Setting goals",
        content,
        language,
        course_id: "course-under-test",
        course_family: family,
    }
}

#[test]
fn generic_batch_follows_plan() {
    let batch = generator().generate(&request(LESSON, "en", "planning", 4), &HashSet::new(), 8, 11);

    assert_eq!(batch.len(), 8);
    let ct = batch
        .iter()
        .filter(|c| c.question_type == QuestionType::CriticalThinking)
        .count();
    assert_eq!(ct, 2);
    assert!(batch.iter().all(|c| c.question_type != QuestionType::Recall));
    assert!(batch.iter().all(|c| c.metadata.strategy == GENERIC_STRATEGY));
    assert!(batch.iter().all(|c| c.hashtags.contains(&"#day-4".to_string())));
}

#[test]
fn same_seed_reproduces_and_other_seeds_permute() {
    let g = generator();
    let req = request(LESSON, "en", "planning", 4);
    let a = g.generate(&req, &HashSet::new(), 8, 99);
    let b = g.generate(&req, &HashSet::new(), 8, 99);
    let c = g.generate(&req, &HashSet::new(), 8, 100);

    assert_eq!(a, b);
    let texts = |batch: &[qw_core::QuestionCandidate]| {
        batch.iter().map(|q| q.text.clone()).collect::<Vec<_>>()
    };
    assert_ne!(texts(&a), texts(&c));
}

#[test]
fn existing_texts_are_never_returned() {
    let g = generator();
    let req = request(LESSON, "en", "planning", 4);
    let first = g.generate(&req, &HashSet::new(), 8, 5);
    let existing: HashSet<String> = first.iter().map(|c| c.normalized_text()).collect();

    let second = g.generate(&req, &existing, 8, 5);
    assert!(!second.is_empty());
    assert!(second.iter().all(|c| !existing.contains(&c.normalized_text())));
}

#[test]
fn short_lesson_without_bank_yields_nothing() {
    let batch = generator().generate(
        &request("Just a title and a line.", "en", "planning", 4),
        &HashSet::new(),
        8,
        1,
    );
    assert!(batch.is_empty());
}

#[test]
fn bespoke_bank_wins_and_returns_surplus() {
    let batch = generator().generate(&request("", "en", "prompt-craft", 1), &HashSet::new(), 8, 3);

    // 8 requested + 4 surplus, capped by the 11-question bank
    assert_eq!(batch.len(), 11);
    assert!(
        batch
            .iter()
            .all(|c| c.metadata.strategy == "prompt-craft-en-day1")
    );
}

#[test]
fn exhausted_bank_falls_through_to_generic() {
    let g = generator();
    let req = request(LESSON, "en", "prompt-craft", 1);
    let bank_batch = g.generate(&req, &HashSet::new(), 8, 3);
    let existing: HashSet<String> = bank_batch.iter().map(|c| c.normalized_text()).collect();

    let next = g.generate(&req, &existing, 8, 4);
    assert!(!next.is_empty());
    assert!(next.iter().all(|c| c.metadata.strategy == GENERIC_STRATEGY));
}

#[test]
fn russian_lesson_stays_in_cyrillic() {
    let batch = generator().generate(&request(RU_LESSON, "ru", "feedback", 2), &HashSet::new(), 7, 8);

    assert_eq!(batch.len(), 7);
    for candidate in &batch {
        assert!(
            Script::Cyrillic.ratio(&candidate.text) > 0.9,
            "not Cyrillic: {}",
            candidate.text
        );
    }
}

#[test]
fn configured_bank_dirs_are_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("custom.toml"),
        r#"
name = "custom-day9"
family = "planning"
languages = ["en"]
days = [9]
rank = 500

[[questions]]
type = "application"
text = "Which step turns a vague goal into a measurable one?"
correct = "Attach a number and a deadline to it"
distractors = ["Make it shorter", "Share it on chat", "Ask a manager to approve it"]
"#,
    )
    .unwrap();

    let config = GeneratorConfig {
        bank_dirs: vec![dir.path().display().to_string()],
        ..GeneratorConfig::default()
    };
    let g = CandidateGenerator::from_config(&config).unwrap();
    let batch = g.generate(&request("", "en", "planning", 9), &HashSet::new(), 3, 0);

    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].metadata.strategy, "custom-day9");
    assert_eq!(batch[0].correct_option(), "Attach a number and a deadline to it");
}
