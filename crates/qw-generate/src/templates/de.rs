use super::{LanguageTemplates, TemplateDraft};

#[derive(Debug, Clone, Copy, Default)]
pub struct German;

impl LanguageTemplates for German {
    fn code(&self) -> &'static str {
        "de"
    }

    fn critical_thinking(&self, principle: &str, constraint: &str, risk: &str) -> TemplateDraft {
        TemplateDraft {
            stem: format!(
                "Sie sollen „{principle}“ {constraint} anwenden. Welcher Ansatz vermeidet dieses Risiko am besten: {risk}?"
            ),
            correct: format!(
                "„{principle}“ an die Einschränkung anpassen und vor der Entscheidung gezielt dieses Risiko prüfen: {risk}"
            ),
            distractors: [
                format!(
                    "„{principle}“ genau wie in der Lektion anwenden, weil Einschränkungen nichts ändern"
                ),
                format!("„{principle}“ zurückstellen, bis die Einschränkung wegfällt"),
                format!("Das Risiko ({risk}) als unvermeidlich hinnehmen und auf jede Prüfung verzichten"),
            ],
        }
    }

    fn application(&self, anchor: &str, scenario: &str) -> TemplateDraft {
        TemplateDraft {
            stem: format!("{scenario} Wie wenden Sie „{anchor}“ hier an?"),
            correct: format!(
                "Mit „{anchor}“ den konkreten nächsten Schritt gestalten und das Ergebnis am Ziel überprüfen"
            ),
            distractors: [
                format!("„{anchor}“ erwähnen, aber weiterarbeiten wie bisher"),
                format!("Mit „{anchor}“ warten, bis jemand anderes es ausprobiert hat"),
                format!("„{anchor}“ sicherheitshalber auf eine unbeteiligte Aufgabe anwenden"),
            ],
        }
    }

    fn lesson_scenario(&self, example: &str) -> String {
        format!("Betrachten Sie diese Situation: {example}")
    }

    fn scenarios(&self) -> &'static [&'static str] {
        &[
            "Eine Kollegin bittet Sie, einen Plan zu prüfen, der morgen fällig ist.",
            "Ein Kunde schickt widersprüchliches Feedback zu Ihrer Arbeit.",
            "Sie müssen ein neues Projekt mit minimaler Vorbereitung starten.",
            "Ihr Team wiederholt denselben Fehler wie letzte Woche.",
            "Ihre Führungskraft bittet um eine kurze Zusammenfassung eines komplexen Themas.",
        ]
    }

    fn constraints(&self) -> &'static [&'static str] {
        &[
            "unter großem Zeitdruck",
            "mit unvollständigen Informationen",
            "trotz uneiniger Beteiligter",
            "mit begrenztem Budget",
            "in einem ungewohnten Umfeld",
        ]
    }

    fn risks(&self) -> &'static [&'static str] {
        &[
            "übermäßiges Vertrauen in das erste Ergebnis",
            "mechanische Anwendung der Idee",
            "übersehene Nebenwirkungen",
            "Verlust des ursprünglichen Ziels",
            "Bestätigungsfehler",
        ]
    }
}
