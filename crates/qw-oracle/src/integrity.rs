//! Lesson-level verdicts used by the audit.

use qw_core::{LessonContent, Script};
use qw_extract::{ConceptExtractor, emphasized_terms, headings, plain_text};

use crate::verdict::{ContentScore, LanguageVerdict};
use crate::{ContentQualityOracle, LanguageIntegrityOracle};

/// Checks that a lesson's text is written in its language's script.
#[derive(Debug, Clone, Copy)]
pub struct ScriptIntegrityOracle {
    min_ratio: f64,
}

impl Default for ScriptIntegrityOracle {
    fn default() -> Self {
        Self { min_ratio: 0.6 }
    }
}

impl ScriptIntegrityOracle {
    #[must_use]
    pub const fn new(min_ratio: f64) -> Self {
        Self { min_ratio }
    }
}

impl LanguageIntegrityOracle for ScriptIntegrityOracle {
    fn check(&self, lesson: &LessonContent) -> LanguageVerdict {
        let script = Script::for_language(&lesson.language);
        let text = format!("{}\n{}", lesson.title, plain_text(&lesson.body));
        let ratio = script.ratio(&text);
        let ok = ratio >= self.min_ratio;
        LanguageVerdict {
            ok,
            ratio,
            detail: (!ok).then(|| {
                format!(
                    "only {:.0}% of letters are {script:?} for language '{}'",
                    ratio * 100.0,
                    lesson.language
                )
            }),
        }
    }
}

/// Scores lesson bodies on length, structure, emphasis, and worked material.
///
/// | Signal | Points |
/// |---|---|
/// | plain-text length (full at 1500 chars) | 40 |
/// | headings, 5 each | 20 |
/// | emphasized terms, 3 each | 15 |
/// | at least one example | 10 |
/// | at least one practice | 10 |
/// | non-empty title | 5 |
#[derive(Debug, Clone, Default)]
pub struct HeuristicContentScorer {
    extractor: ConceptExtractor,
}

const FULL_LENGTH_CHARS: usize = 1500;

impl ContentQualityOracle for HeuristicContentScorer {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn score(&self, lesson: &LessonContent) -> ContentScore {
        let mut notes = Vec::new();
        let length = plain_text(&lesson.body).chars().count();
        let length_points =
            (length.min(FULL_LENGTH_CHARS) as f64 / FULL_LENGTH_CHARS as f64 * 40.0).round() as u32;
        if length < FULL_LENGTH_CHARS {
            notes.push(format!("body is {length} characters"));
        }

        let concepts = self
            .extractor
            .extract(&lesson.title, &lesson.body, &lesson.language);
        let title = lesson.title.trim();
        let heading_count = headings(&lesson.body).len();
        let emphasized = emphasized_terms(&lesson.body).len();

        let heading_points = (heading_count.min(4) * 5) as u32;
        if heading_count == 0 {
            notes.push("no headings".into());
        }
        let emphasis_points = (emphasized.min(5) * 3) as u32;
        if emphasized == 0 {
            notes.push("no emphasized terms".into());
        }
        let example_points = if concepts.examples.is_empty() {
            notes.push("no examples".into());
            0
        } else {
            10
        };
        let practice_points = if concepts.practices.is_empty() {
            notes.push("no practices".into());
            0
        } else {
            10
        };
        let title_points = if title.is_empty() { 0 } else { 5 };

        let total = length_points
            + heading_points
            + emphasis_points
            + example_points
            + practice_points
            + title_points;
        ContentScore {
            score: u8::try_from(total.min(100)).unwrap_or(100),
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn lesson(title: &str, body: &str, language: &str) -> LessonContent {
        LessonContent {
            id: "l1".into(),
            course_id: "c1".into(),
            day_number: 1,
            title: title.into(),
            body: body.into(),
            language: language.into(),
            active: true,
        }
    }

    #[test]
    fn cyrillic_lesson_with_latin_body_fails() {
        let l = lesson("Урок", "This body was pasted from the English course.", "ru");
        let verdict = ScriptIntegrityOracle::default().check(&l);
        assert!(!verdict.ok);
        assert!(verdict.detail.unwrap().contains("Cyrillic"));
    }

    #[test]
    fn latin_lesson_passes() {
        let l = lesson("Célok", "Fontos, hogy a cél legyen világos.", "hu");
        assert!(ScriptIntegrityOracle::default().check(&l).ok);
    }

    #[test]
    fn empty_body_scores_only_title() {
        let score = HeuristicContentScorer::default().score(&lesson("Only a title", "", "en"));
        assert_eq!(score.score, 5);
        assert!(score.notes.contains(&"no headings".to_string()));
    }

    #[test]
    fn structured_lesson_scores_high() {
        let mut body = String::from(
            "## Goals\n## Scope\n## Risks\n## Review\n\
             Use **clear goals**, **owners**, **dates**, **budgets**, and **checkpoints**.\n\
             For example, a launch plan names one owner per task.\n\
             You should always review the plan weekly.\n",
        );
        while plain_text(&body).chars().count() < FULL_LENGTH_CHARS {
            body.push_str("Plans drift when nobody checks them against reality. ");
        }
        let score = HeuristicContentScorer::default().score(&lesson("Planning", &body, "en"));
        assert_eq!(score.score, 100);
        assert!(score.notes.is_empty());
    }
}
