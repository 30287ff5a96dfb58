//! Reference rule set, `rules-v1`.
//!
//! Every error string starts with a stable rule name followed by `: ` and a
//! human-readable detail, so callers can match on the prefix.

use std::collections::HashMap;

use qw_core::{QuestionType, QuotaTarget, Script, TypeCounts, normalize_question_text};

use crate::QualityOracle;
use crate::verdict::{BatchVerdict, LessonContext, QuestionView, Verdict};

pub const RULES_V1: &str = "rules-v1";

const PLACEHOLDER_MARKERS: &[&str] = &["{", "}", "[[", "]]", "TODO", "Lorem ipsum", "lorem ipsum", "XXX"];

/// Thresholds for [`RuleOracle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSettings {
    pub min_text_chars: usize,
    pub max_text_chars: usize,
    pub max_option_chars: usize,
    /// Minimum script share for questions in non-Latin languages.
    pub script_ratio: f64,
    /// Share of a batch's correct answers allowed at one option position
    /// before a warning is raised.
    pub position_skew: f64,
    pub quota: QuotaTarget,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            min_text_chars: 15,
            max_text_chars: 400,
            max_option_chars: 200,
            script_ratio: 0.6,
            position_skew: 0.6,
            quota: QuotaTarget::default(),
        }
    }
}

/// Deterministic, offline quality oracle.
#[derive(Debug, Clone, Default)]
pub struct RuleOracle {
    settings: RuleSettings,
}

impl RuleOracle {
    #[must_use]
    pub const fn new(settings: RuleSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &RuleSettings {
        &self.settings
    }

    fn text_rules(&self, text: &str, errors: &mut Vec<String>) {
        let trimmed = text.trim();
        let chars = trimmed.chars().count();
        if chars < self.settings.min_text_chars {
            errors.push(format!(
                "text_too_short: {chars} characters, minimum {}",
                self.settings.min_text_chars
            ));
        } else if chars > self.settings.max_text_chars {
            errors.push(format!(
                "text_too_long: {chars} characters, maximum {}",
                self.settings.max_text_chars
            ));
        }
        if !trimmed.ends_with(['?', '？', '؟']) {
            errors.push("missing_question_mark: question text must end with '?'".into());
        }
    }

    fn option_rules(&self, item: &QuestionView<'_>, errors: &mut Vec<String>) {
        if item.correct_index > 3 {
            errors.push(format!(
                "correct_index_out_of_range: {} is not in 0..=3",
                item.correct_index
            ));
        }
        let question = normalize_question_text(item.text);
        let mut seen: Vec<String> = Vec::with_capacity(4);
        for (i, option) in item.options.iter().enumerate() {
            let normalized = normalize_question_text(option);
            if normalized.is_empty() {
                errors.push(format!("empty_option: option {i} is blank"));
                continue;
            }
            if option.chars().count() > self.settings.max_option_chars {
                errors.push(format!(
                    "option_too_long: option {i} exceeds {} characters",
                    self.settings.max_option_chars
                ));
            }
            if normalized == question {
                errors.push(format!("option_repeats_question: option {i}"));
            }
            if seen.contains(&normalized) {
                errors.push(format!("duplicate_option: option {i} repeats an earlier option"));
            }
            seen.push(normalized);
        }
    }

    fn script_rule(&self, item: &QuestionView<'_>, language: &str, errors: &mut Vec<String>) {
        let script = Script::for_language(language);
        if script.is_latin() {
            return;
        }
        let mut all = String::from(item.text);
        for option in item.options {
            all.push(' ');
            all.push_str(option);
        }
        let ratio = script.ratio(&all);
        if ratio < self.settings.script_ratio {
            errors.push(format!(
                "wrong_script: {:.0}% of letters are {script:?}, expected at least {:.0}%",
                ratio * 100.0,
                self.settings.script_ratio * 100.0
            ));
        }
    }
}

impl QualityOracle for RuleOracle {
    fn version(&self) -> &str {
        RULES_V1
    }

    fn validate_one(&self, item: &QuestionView<'_>, lesson: &LessonContext<'_>) -> Verdict {
        let mut errors = Vec::new();
        if item.question_type == QuestionType::Recall {
            errors.push("recall_not_allowed: recall questions are not accepted".into());
        }
        self.text_rules(item.text, &mut errors);
        self.option_rules(item, &mut errors);

        if let Some(marker) = PLACEHOLDER_MARKERS.iter().find(|m| item.text.contains(**m)) {
            errors.push(format!("unresolved_placeholder: text contains {marker:?}"));
        }
        self.script_rule(item, lesson.language, &mut errors);

        Verdict::from_errors(errors)
    }

    fn validate_batch(
        &self,
        items: &[QuestionView<'_>],
        language: &str,
        lesson_title: &str,
    ) -> BatchVerdict {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let mut by_text: HashMap<String, usize> = HashMap::new();
        for item in items {
            *by_text.entry(normalize_question_text(item.text)).or_default() += 1;
        }
        let duplicated = by_text.values().filter(|n| **n > 1).count();
        if duplicated > 0 {
            errors.push(format!(
                "duplicate_questions: {duplicated} question text(s) appear more than once"
            ));
        }

        let counts = TypeCounts::tally(items.iter().map(|i| i.question_type));
        let quota = &self.settings.quota;
        if counts.recall > quota.recall_max {
            errors.push(format!("recall_present: {} recall question(s)", counts.recall));
        }
        if !quota.is_satisfied(&counts) {
            errors.push(format!(
                "quota_not_met: {} total, {} application, {} critical thinking \
                 (need {}/{}/{})",
                counts.total(),
                counts.application,
                counts.critical_thinking,
                quota.total_min,
                quota.application_min,
                quota.critical_thinking_min
            ));
        }

        if items.len() >= 4 {
            let mut positions = [0usize; 4];
            for item in items {
                positions[usize::from(item.correct_index.min(3))] += 1;
            }
            let max = positions.iter().copied().max().unwrap_or(0);
            #[allow(clippy::cast_precision_loss)]
            let share = max as f64 / items.len() as f64;
            if share > self.settings.position_skew {
                warnings.push(format!(
                    "answer_position_skew: {:.0}% of correct answers share one position",
                    share * 100.0
                ));
            }
        }

        let verdict = BatchVerdict::from_findings(errors, warnings);
        tracing::debug!(
            language,
            lesson = lesson_title,
            items = items.len(),
            valid = verdict.valid,
            "batch validated"
        );
        verdict
    }
}
