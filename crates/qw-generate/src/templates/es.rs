use super::{LanguageTemplates, TemplateDraft};

#[derive(Debug, Clone, Copy, Default)]
pub struct Spanish;

impl LanguageTemplates for Spanish {
    fn code(&self) -> &'static str {
        "es"
    }

    fn critical_thinking(&self, principle: &str, constraint: &str, risk: &str) -> TemplateDraft {
        TemplateDraft {
            stem: format!(
                "Debes aplicar «{principle}» {constraint}. ¿Qué enfoque evita mejor este riesgo: {risk}?"
            ),
            correct: format!(
                "Adaptar «{principle}» a la restricción y revisar expresamente este riesgo antes de decidir: {risk}"
            ),
            distractors: [
                format!(
                    "Aplicar «{principle}» exactamente como en la lección, porque las restricciones no cambian nada"
                ),
                format!("Dejar «{principle}» de lado hasta que desaparezca la restricción"),
                format!("Aceptar el riesgo ({risk}) como inevitable y omitir cualquier revisión"),
            ],
        }
    }

    fn application(&self, anchor: &str, scenario: &str) -> TemplateDraft {
        TemplateDraft {
            stem: format!("{scenario} ¿Cómo aplicarías «{anchor}» aquí?"),
            correct: format!(
                "Usar «{anchor}» para definir el siguiente paso concreto y contrastar el resultado con el objetivo"
            ),
            distractors: [
                format!("Mencionar «{anchor}» pero seguir trabajando como antes"),
                format!("Esperar a que otra persona pruebe «{anchor}» primero"),
                format!("Aplicar «{anchor}» a una tarea sin relación, por si acaso"),
            ],
        }
    }

    fn lesson_scenario(&self, example: &str) -> String {
        format!("Considera esta situación: {example}")
    }

    fn scenarios(&self) -> &'static [&'static str] {
        &[
            "Un colega te pide revisar un plan que vence mañana.",
            "Un cliente envía comentarios contradictorios sobre tu trabajo.",
            "Debes iniciar un proyecto nuevo con una preparación mínima.",
            "Tu equipo repite el mismo error que la semana pasada.",
            "Tu responsable pide un resumen breve de un tema complejo.",
        ]
    }

    fn constraints(&self) -> &'static [&'static str] {
        &[
            "con un plazo muy ajustado",
            "con información incompleta",
            "mientras las partes interesadas discrepan",
            "con un presupuesto limitado",
            "en un contexto desconocido",
        ]
    }

    fn risks(&self) -> &'static [&'static str] {
        &[
            "el exceso de confianza en el primer resultado",
            "la aplicación mecánica de la idea",
            "ignorar los efectos secundarios",
            "perder de vista el objetivo original",
            "el sesgo de confirmación",
        ]
    }
}
