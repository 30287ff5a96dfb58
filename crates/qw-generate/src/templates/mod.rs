//! Per-language phrase templates for the generic strategy.
//!
//! Each language implements [`LanguageTemplates`]; [`TemplateRegistry`] maps
//! language codes to implementations once at construction and is immutable
//! afterwards. Languages without templates fall back to English.

mod de;
mod en;
mod es;
mod hu;
mod ru;

use std::collections::HashMap;
use std::sync::Arc;

pub use de::German;
pub use en::English;
pub use es::Spanish;
pub use hu::Hungarian;
pub use ru::Russian;

/// A question stem with its correct answer and three distractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    pub stem: String,
    pub correct: String,
    pub distractors: [String; 3],
}

/// Phrase templates for one language.
pub trait LanguageTemplates: Send + Sync {
    /// ISO 639-1 code this table serves.
    fn code(&self) -> &'static str;

    /// Principle `principle` applied under `constraint`, guarding against `risk`.
    fn critical_thinking(&self, principle: &str, constraint: &str, risk: &str) -> TemplateDraft;

    /// Practice or term `anchor` applied to a concrete `scenario`.
    fn application(&self, anchor: &str, scenario: &str) -> TemplateDraft;

    /// Wrap an example taken from the lesson so it reads as a scenario.
    fn lesson_scenario(&self, example: &str) -> String;

    fn scenarios(&self) -> &'static [&'static str];
    fn constraints(&self) -> &'static [&'static str];
    fn risks(&self) -> &'static [&'static str];
}

/// Immutable language → templates map.
#[derive(Clone)]
pub struct TemplateRegistry {
    by_code: HashMap<&'static str, Arc<dyn LanguageTemplates>>,
    fallback: Arc<dyn LanguageTemplates>,
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut codes: Vec<_> = self.by_code.keys().collect();
        codes.sort();
        f.debug_struct("TemplateRegistry")
            .field("languages", &codes)
            .field("fallback", &self.fallback.code())
            .finish()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateRegistry {
    /// Registry with every built-in language.
    #[must_use]
    pub fn builtin() -> Self {
        Self::with_languages(vec![
            Arc::new(English),
            Arc::new(Hungarian),
            Arc::new(German),
            Arc::new(Spanish),
            Arc::new(Russian),
        ])
    }

    /// Registry over `tables`, falling back to English for unknown codes.
    #[must_use]
    pub fn with_languages(tables: Vec<Arc<dyn LanguageTemplates>>) -> Self {
        let by_code = tables.into_iter().map(|t| (t.code(), t)).collect();
        Self {
            by_code,
            fallback: Arc::new(English),
        }
    }

    /// Templates for `language` (`pt-BR` resolves through `pt`).
    #[must_use]
    pub fn resolve(&self, language: &str) -> &dyn LanguageTemplates {
        self.by_code
            .get(base_code(language).as_str())
            .map_or(&*self.fallback, |table| &**table)
    }
}

fn base_code(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or(language)
        .to_ascii_lowercase()
}
