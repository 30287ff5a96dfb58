use super::{LanguageTemplates, TemplateDraft};

#[derive(Debug, Clone, Copy, Default)]
pub struct Russian;

impl LanguageTemplates for Russian {
    fn code(&self) -> &'static str {
        "ru"
    }

    fn critical_thinking(&self, principle: &str, constraint: &str, risk: &str) -> TemplateDraft {
        TemplateDraft {
            stem: format!(
                "Вам нужно применить «{principle}» {constraint}. Какой подход лучше всего помогает избежать риска: {risk}?"
            ),
            correct: format!(
                "Адаптировать «{principle}» к ограничению и перед решением отдельно проверить риск: {risk}"
            ),
            distractors: [
                format!("Применить «{principle}» точно как в уроке, ведь ограничения ничего не меняют"),
                format!("Отложить «{principle}», пока ограничение не исчезнет"),
                format!("Считать риск неизбежным ({risk}) и не проводить проверку"),
            ],
        }
    }

    fn application(&self, anchor: &str, scenario: &str) -> TemplateDraft {
        TemplateDraft {
            stem: format!("{scenario} Как вы примените здесь «{anchor}»?"),
            correct: format!(
                "Использовать «{anchor}», чтобы определить конкретный следующий шаг, и сверить результат с целью"
            ),
            distractors: [
                format!("Упомянуть «{anchor}», но продолжать работать по-старому"),
                format!("Подождать, пока кто-то другой не попробует «{anchor}»"),
                format!("Применить «{anchor}» к несвязанной задаче на всякий случай"),
            ],
        }
    }

    fn lesson_scenario(&self, example: &str) -> String {
        format!("Рассмотрим ситуацию: {example}")
    }

    fn scenarios(&self) -> &'static [&'static str] {
        &[
            "Коллега просит проверить план, который нужно сдать завтра.",
            "Клиент прислал противоречивые отзывы о вашей работе.",
            "Нужно запустить новый проект почти без подготовки.",
            "Команда повторяет ту же ошибку, что и на прошлой неделе.",
            "Руководитель просит кратко изложить сложную тему.",
        ]
    }

    fn constraints(&self) -> &'static [&'static str] {
        &[
            "в условиях жёсткого дедлайна",
            "при неполной информации",
            "при разногласиях между участниками",
            "при ограниченном бюджете",
            "в незнакомой обстановке",
        ]
    }

    fn risks(&self) -> &'static [&'static str] {
        &[
            "излишнее доверие к первому результату",
            "механическое применение идеи",
            "игнорирование побочных эффектов",
            "потеря из виду исходной цели",
            "предвзятость подтверждения",
        ]
    }
}
