//! # qw-extract
//!
//! Turns a lesson's title and markup-bearing body into structured signals the
//! generator builds questions from:
//!
//! | Signal | Primary source | Fallbacks (in order) |
//! |---|---|---|
//! | main topics | headings | title |
//! | key terms | emphasized spans | title words, sentence fragments, title |
//! | examples | example-marker sentences | none |
//! | practices | practice-marker sentences | none |
//! | concepts | "important" marker sentences | leading sentences, title |
//!
//! A fallback tier runs only when every tier before it came back empty, so
//! extraction never fails on sparse input. For lessons written in a non-Latin
//! script every list is filtered to snippets in that script; a list the
//! filter would empty is kept unfiltered instead.

mod markers;
mod markup;

pub use markers::{LanguageFamily, MarkerSet};

use std::collections::HashSet;

use qw_core::Script;
use serde::{Deserialize, Serialize};

/// Per-list caps and the script filter threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractLimits {
    pub topics: usize,
    pub key_terms: usize,
    pub examples: usize,
    pub practices: usize,
    pub concepts: usize,
    /// Minimum share of letters in the target script for a snippet to survive.
    pub script_ratio: f64,
}

impl Default for ExtractLimits {
    fn default() -> Self {
        Self {
            topics: 5,
            key_terms: 10,
            examples: 5,
            practices: 5,
            concepts: 5,
            script_ratio: 0.6,
        }
    }
}

/// Signals extracted from one lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concepts {
    pub main_topics: Vec<String>,
    pub key_terms: Vec<String>,
    pub examples: Vec<String>,
    pub practices: Vec<String>,
    pub concepts: Vec<String>,
}

/// Stateless extractor configured with caps.
#[derive(Debug, Clone, Default)]
pub struct ConceptExtractor {
    limits: ExtractLimits,
}

const MAX_SNIPPET_WORDS: usize = 24;
const MAX_TERM_WORDS: usize = 6;
const FRAGMENT_WORDS: usize = 4;

impl ConceptExtractor {
    #[must_use]
    pub const fn new(limits: ExtractLimits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub const fn limits(&self) -> &ExtractLimits {
        &self.limits
    }

    /// Extract every signal list for one lesson.
    #[must_use]
    pub fn extract(&self, title: &str, content: &str, language: &str) -> Concepts {
        let title = title.trim();
        let script = Script::for_language(language);
        let markers = LanguageFamily::for_language(language).markers();
        let plain = markup::strip(content);
        let sentences = markup::sentences(&plain);

        let main_topics = self.finish(
            or_fallback(markup::headings(content), || title_only(title)),
            script,
            self.limits.topics,
        );

        let key_terms = or_fallback(emphasized_terms(content), || title_words(title, markers));
        let key_terms = or_fallback(key_terms, || fragments(&sentences));
        let key_terms = self.finish(
            or_fallback(key_terms, || title_only(title)),
            script,
            self.limits.key_terms,
        );

        let examples = self.finish(
            example_snippets(&sentences, markers),
            script,
            self.limits.examples,
        );

        let practices = self.finish(
            sentences
                .iter()
                .filter(|s| markers.is_practice(&s.to_lowercase()))
                .map(|s| clip_words(s, MAX_SNIPPET_WORDS))
                .collect(),
            script,
            self.limits.practices,
        );

        let important: Vec<String> = sentences
            .iter()
            .filter(|s| markers.is_important(&s.to_lowercase()))
            .map(|s| clip_words(s, MAX_SNIPPET_WORDS))
            .collect();
        let concepts = or_fallback(important, || {
            sentences
                .iter()
                .take(self.limits.concepts)
                .map(|s| clip_words(s, MAX_SNIPPET_WORDS))
                .collect()
        });
        let concepts = self.finish(
            or_fallback(concepts, || title_only(title)),
            script,
            self.limits.concepts,
        );

        tracing::debug!(
            language,
            topics = main_topics.len(),
            key_terms = key_terms.len(),
            examples = examples.len(),
            practices = practices.len(),
            concepts = concepts.len(),
            "extracted lesson concepts"
        );

        Concepts {
            main_topics,
            key_terms,
            examples,
            practices,
            concepts,
        }
    }

    fn finish(&self, items: Vec<String>, script: Script, cap: usize) -> Vec<String> {
        let mut items = dedup(items);
        if !script.is_latin() {
            items = filter_by_script(items, script, self.limits.script_ratio);
        }
        items.truncate(cap);
        items
    }
}

/// Markup-free body text, as the generator's minimum-length check sees it.
#[must_use]
pub fn plain_text(content: &str) -> String {
    markup::strip(content)
}

/// Headings found in a body, without any title fallback.
#[must_use]
pub fn headings(content: &str) -> Vec<String> {
    dedup(markup::headings(content))
}

/// Emphasized spans short enough to be terms, without any fallback.
#[must_use]
pub fn emphasized_terms(content: &str) -> Vec<String> {
    dedup(
        markup::emphasized(content)
            .into_iter()
            .filter(|term| term.split_whitespace().count() <= MAX_TERM_WORDS)
            .collect(),
    )
}

/// Keep snippets written mostly in `script`; fall back to all of them.
#[must_use]
pub fn filter_by_script(items: Vec<String>, script: Script, min_ratio: f64) -> Vec<String> {
    let filtered: Vec<String> = items
        .iter()
        .filter(|item| script.ratio(item) >= min_ratio)
        .cloned()
        .collect();
    if filtered.is_empty() { items } else { filtered }
}

/// Use `fallback` only when `items` has nothing left after trimming.
fn or_fallback<F>(items: Vec<String>, fallback: F) -> Vec<String>
where
    F: FnOnce() -> Vec<String>,
{
    let items = non_blank(items);
    if items.is_empty() {
        non_blank(fallback())
    } else {
        items
    }
}

fn non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn title_only(title: &str) -> Vec<String> {
    vec![title.to_string()]
}

fn title_words(title: &str, markers: &MarkerSet) -> Vec<String> {
    title
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .map(|w| w.trim_matches('-'))
        .filter(|w| w.chars().count() >= 4)
        .filter(|w| !markers.is_stopword(&w.to_lowercase()))
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

fn fragments(sentences: &[String]) -> Vec<String> {
    sentences
        .iter()
        .map(|s| {
            s.split_whitespace()
                .take(FRAGMENT_WORDS)
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end_matches(|c: char| c.is_ascii_punctuation())
                .to_string()
        })
        .collect()
}

fn example_snippets(sentences: &[String], markers: &MarkerSet) -> Vec<String> {
    sentences
        .iter()
        .filter_map(|sentence| {
            let lower = sentence.to_lowercase();
            let end = markers.example_marker_end(&lower)?;
            // Lower-casing can change byte lengths; map back by char count.
            let chars_before = lower[..end].chars().count();
            let tail: String = sentence.chars().skip(chars_before).collect();
            let tail = tail.trim_start_matches([',', ':', ' ', '-']).trim();
            let snippet = if tail.chars().filter(|c| c.is_alphabetic()).count() >= 3 {
                tail
            } else {
                sentence.as_str()
            };
            Some(clip_words(snippet, MAX_SNIPPET_WORDS))
        })
        .collect()
}

fn clip_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }
    format!("{}…", words[..max_words].join(" "))
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
