use super::{LanguageTemplates, TemplateDraft};

#[derive(Debug, Clone, Copy, Default)]
pub struct Hungarian;

impl LanguageTemplates for Hungarian {
    fn code(&self) -> &'static str {
        "hu"
    }

    fn critical_thinking(&self, principle: &str, constraint: &str, risk: &str) -> TemplateDraft {
        TemplateDraft {
            stem: format!(
                "A(z) „{principle}” elvet {constraint} kell alkalmaznod. Melyik megközelítés kerüli el legjobban ezt a kockázatot: {risk}?"
            ),
            correct: format!(
                "Igazítsd a(z) „{principle}” elvet a korláthoz, és döntés előtt kifejezetten ellenőrizd ezt a kockázatot: {risk}"
            ),
            distractors: [
                format!(
                    "Alkalmazd a(z) „{principle}” elvet pontosan úgy, ahogy a leckében, mert a korlátok nem számítanak"
                ),
                format!("Tedd félre a(z) „{principle}” elvet, amíg a korlát meg nem szűnik"),
                format!("Fogadd el elkerülhetetlennek ezt a kockázatot ({risk}), és hagyd ki az ellenőrzést"),
            ],
        }
    }

    fn application(&self, anchor: &str, scenario: &str) -> TemplateDraft {
        TemplateDraft {
            stem: format!("{scenario} Hogyan alkalmaznád itt ezt: „{anchor}”?"),
            correct: format!(
                "A(z) „{anchor}” alapján határozd meg a konkrét következő lépést, majd vesd össze az eredményt a céllal"
            ),
            distractors: [
                format!("Említsd meg a(z) „{anchor}” fogalmat, de dolgozz tovább a régi módon"),
                format!("Várj a(z) „{anchor}” alkalmazásával, amíg más ki nem próbálja"),
                format!(
                    "Alkalmazd a(z) „{anchor}” fogalmat egy nem kapcsolódó feladatra a biztonság kedvéért"
                ),
            ],
        }
    }

    fn lesson_scenario(&self, example: &str) -> String {
        format!("Vegyük ezt a helyzetet: {example}")
    }

    fn scenarios(&self) -> &'static [&'static str] {
        &[
            "Egy kolléga arra kér, nézz át egy holnapra esedékes tervet.",
            "Az ügyfél ellentmondó visszajelzést küldött a munkádról.",
            "Egy új projektet kell elindítanod minimális előkészítéssel.",
            "A csapatod megismétli ugyanazt a hibát, mint múlt héten.",
            "A vezetőd rövid összefoglalót kér egy összetett témáról.",
        ]
    }

    fn constraints(&self) -> &'static [&'static str] {
        &[
            "szoros határidő mellett",
            "hiányos információk birtokában",
            "az érintettek nézeteltérése közepette",
            "korlátozott költségvetéssel",
            "ismeretlen környezetben",
        ]
    }

    fn risks(&self) -> &'static [&'static str] {
        &[
            "túlzott bizalom az első eredményben",
            "az ötlet gépies alkalmazása",
            "a mellékhatások figyelmen kívül hagyása",
            "az eredeti cél szem elől tévesztése",
            "megerősítési torzítás",
        ]
    }
}
