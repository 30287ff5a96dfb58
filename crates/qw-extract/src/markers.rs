//! Marker phrases and stopwords per language family.

/// Language families that share marker vocabulary closely enough to pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFamily {
    English,
    Hungarian,
    German,
    Romance,
    Slavic,
}

impl LanguageFamily {
    /// Family for a language code. Unknown languages use English markers.
    #[must_use]
    pub fn for_language(code: &str) -> Self {
        let base = code
            .split(['-', '_'])
            .next()
            .unwrap_or(code)
            .to_ascii_lowercase();
        match base.as_str() {
            "hu" => Self::Hungarian,
            "de" => Self::German,
            "es" | "fr" | "it" | "pt" | "ro" | "ca" => Self::Romance,
            "ru" | "uk" | "pl" | "cs" | "sk" | "bg" | "sr" | "hr" | "sl" => Self::Slavic,
            _ => Self::English,
        }
    }

    #[must_use]
    pub const fn markers(self) -> &'static MarkerSet {
        match self {
            Self::English => &ENGLISH,
            Self::Hungarian => &HUNGARIAN,
            Self::German => &GERMAN,
            Self::Romance => &ROMANCE,
            Self::Slavic => &SLAVIC,
        }
    }
}

/// Lower-case phrases whose presence classifies a sentence.
#[derive(Debug)]
pub struct MarkerSet {
    pub examples: &'static [&'static str],
    pub practices: &'static [&'static str],
    pub important: &'static [&'static str],
    pub stopwords: &'static [&'static str],
}

impl MarkerSet {
    /// Byte offset just past the first example marker in `lower`, if any.
    pub(crate) fn example_marker_end(&self, lower: &str) -> Option<usize> {
        self.examples
            .iter()
            .filter_map(|marker| lower.find(marker).map(|at| at + marker.len()))
            .min()
    }

    pub(crate) fn is_practice(&self, lower: &str) -> bool {
        self.practices.iter().any(|marker| lower.contains(marker))
    }

    pub(crate) fn is_important(&self, lower: &str) -> bool {
        self.important.iter().any(|marker| lower.contains(marker))
    }

    pub(crate) fn is_stopword(&self, lower_word: &str) -> bool {
        self.stopwords.contains(&lower_word) || ENGLISH.stopwords.contains(&lower_word)
    }
}

static ENGLISH: MarkerSet = MarkerSet {
    examples: &["for example", "for instance", "e.g.", "such as", "imagine"],
    practices: &[
        "should",
        "best practice",
        "always",
        "make sure",
        "try to",
        "avoid",
        "tip:",
    ],
    important: &[
        "important",
        "critical",
        "essential",
        "crucial",
        "key point",
        "remember",
    ],
    stopwords: &[
        "the", "and", "for", "with", "your", "from", "into", "that", "this", "what", "how", "why",
        "about", "day", "lesson", "part", "using", "use", "when", "are", "you",
    ],
};

static HUNGARIAN: MarkerSet = MarkerSet {
    examples: &["például", "pl.", "vegyük", "képzeld el"],
    practices: &["érdemes", "mindig", "kerüld", "javasolt", "próbáld", "ügyelj"],
    important: &["fontos", "kritikus", "lényeges", "kulcsfontosságú", "ne feledd"],
    stopwords: &[
        "a", "az", "és", "hogy", "egy", "nap", "lecke", "rész", "mit", "hogyan", "miért", "mint",
        "vagy", "van", "nem",
    ],
};

static GERMAN: MarkerSet = MarkerSet {
    examples: &["zum beispiel", "z. b.", "z.b.", "beispielsweise", "etwa"],
    practices: &["sollte", "immer", "vermeide", "achte darauf", "empfohlen"],
    important: &["wichtig", "entscheidend", "kritisch", "wesentlich"],
    stopwords: &[
        "der", "die", "das", "und", "mit", "für", "ein", "eine", "wie", "was", "warum", "tag",
        "lektion", "teil",
    ],
};

static ROMANCE: MarkerSet = MarkerSet {
    examples: &["por ejemplo", "par exemple", "ad esempio", "por exemplo", "de exemplu"],
    practices: &["debe", "siempre", "doit", "toujours", "sempre", "deve", "evita", "évitez"],
    important: &[
        "importante",
        "crítico",
        "important",
        "essentiel",
        "fondamentale",
        "clave",
    ],
    stopwords: &[
        "el", "la", "los", "las", "le", "les", "de", "del", "des", "y", "et", "e", "para", "pour",
        "con", "avec", "día", "jour", "lección", "leçon",
    ],
};

static SLAVIC: MarkerSet = MarkerSet {
    examples: &["например", "наприклад", "na przykład", "například", "к примеру"],
    practices: &["следует", "всегда", "нужно", "należy", "zawsze", "vždy", "избегайте"],
    important: &["важно", "критически", "ключев", "ważne", "důležité", "главное"],
    stopwords: &[
        "и", "в", "на", "с", "для", "как", "что", "день", "урок", "часть", "i", "w", "z", "na",
        "jak", "dzień",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_resolve_from_codes() {
        assert_eq!(LanguageFamily::for_language("hu"), LanguageFamily::Hungarian);
        assert_eq!(LanguageFamily::for_language("pt-BR"), LanguageFamily::Romance);
        assert_eq!(LanguageFamily::for_language("uk"), LanguageFamily::Slavic);
        assert_eq!(LanguageFamily::for_language("ja"), LanguageFamily::English);
    }

    #[test]
    fn example_marker_end_points_past_marker() {
        let lower = "we could, for example, draft a plan";
        let end = ENGLISH.example_marker_end(lower).unwrap();
        assert_eq!(&lower[end..], ", draft a plan");
    }

    #[test]
    fn english_stopwords_apply_everywhere() {
        assert!(HUNGARIAN.is_stopword("the"));
        assert!(HUNGARIAN.is_stopword("hogyan"));
        assert!(!HUNGARIAN.is_stopword("promptolás"));
    }
}
