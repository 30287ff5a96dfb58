use super::{LanguageTemplates, TemplateDraft};

/// English templates; also the fallback table.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl LanguageTemplates for English {
    fn code(&self) -> &'static str {
        "en"
    }

    fn critical_thinking(&self, principle: &str, constraint: &str, risk: &str) -> TemplateDraft {
        TemplateDraft {
            stem: format!(
                "You need to apply \"{principle}\" {constraint}. Which approach best avoids {risk}?"
            ),
            correct: format!(
                "Adapt \"{principle}\" to the constraint and check explicitly for {risk} before committing"
            ),
            distractors: [
                format!(
                    "Apply \"{principle}\" exactly as in the lesson, since constraints do not change the outcome"
                ),
                format!("Set \"{principle}\" aside until the constraint disappears"),
                format!("Accept {risk} as unavoidable and skip any review"),
            ],
        }
    }

    fn application(&self, anchor: &str, scenario: &str) -> TemplateDraft {
        TemplateDraft {
            stem: format!("{scenario} How would you apply \"{anchor}\" here?"),
            correct: format!(
                "Use \"{anchor}\" to shape the concrete next step, then check the result against the goal"
            ),
            distractors: [
                format!("Mention \"{anchor}\" but keep working the way you did before"),
                format!("Wait to use \"{anchor}\" until someone else has tried it"),
                format!("Apply \"{anchor}\" to an unrelated task to be on the safe side"),
            ],
        }
    }

    fn lesson_scenario(&self, example: &str) -> String {
        format!("Consider this situation: {example}")
    }

    fn scenarios(&self) -> &'static [&'static str] {
        &[
            "A colleague asks you to review a plan that is due tomorrow.",
            "A client sends contradictory feedback on your work.",
            "You have to start a new project with minimal preparation.",
            "Your team repeats the same mistake it made last week.",
            "Your manager asks for a short summary of a complex topic.",
        ]
    }

    fn constraints(&self) -> &'static [&'static str] {
        &[
            "under a tight deadline",
            "with incomplete information",
            "while stakeholders disagree",
            "on a limited budget",
            "in an unfamiliar context",
        ]
    }

    fn risks(&self) -> &'static [&'static str] {
        &[
            "overconfidence in the first result",
            "applying the idea mechanically",
            "ignoring side effects",
            "losing sight of the original goal",
            "confirmation bias",
        ]
    }
}
