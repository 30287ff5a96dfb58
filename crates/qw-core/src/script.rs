//! Writing-script detection.
//!
//! Lessons in languages written in a non-Latin script must not leak Latin
//! boilerplate into questions. The extractor, oracle, and audit all ask the
//! same question: what share of the letters in this text belong to the
//! lesson's script?

use serde::{Deserialize, Serialize};

/// Writing system of a lesson language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Latin,
    Cyrillic,
    Greek,
    Arabic,
    Hebrew,
    Devanagari,
    Han,
    Kana,
    Hangul,
    Thai,
}

impl Script {
    /// Script for an ISO 639-1 language code. Unknown codes are treated as Latin.
    #[must_use]
    pub fn for_language(code: &str) -> Self {
        let base = code
            .split(['-', '_'])
            .next()
            .unwrap_or(code)
            .to_ascii_lowercase();
        match base.as_str() {
            "ru" | "uk" | "bg" | "sr" | "mk" | "be" | "kk" => Self::Cyrillic,
            "el" => Self::Greek,
            "ar" | "fa" | "ur" => Self::Arabic,
            "he" | "yi" => Self::Hebrew,
            "hi" | "mr" | "ne" => Self::Devanagari,
            "zh" => Self::Han,
            "ja" => Self::Kana,
            "ko" => Self::Hangul,
            "th" => Self::Thai,
            _ => Self::Latin,
        }
    }

    #[must_use]
    pub const fn is_latin(self) -> bool {
        matches!(self, Self::Latin)
    }

    /// Whether `c` belongs to this script.
    ///
    /// Japanese text mixes kana and kanji, so `Kana` accepts both.
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        let cp = u32::from(c);
        match self {
            Self::Latin => c.is_ascii_alphabetic() || (0x00C0..=0x024F).contains(&cp),
            Self::Cyrillic => (0x0400..=0x052F).contains(&cp),
            Self::Greek => (0x0370..=0x03FF).contains(&cp) || (0x1F00..=0x1FFF).contains(&cp),
            Self::Arabic => (0x0600..=0x06FF).contains(&cp) || (0x0750..=0x077F).contains(&cp),
            Self::Hebrew => (0x0590..=0x05FF).contains(&cp),
            Self::Devanagari => (0x0900..=0x097F).contains(&cp),
            Self::Han => is_han(cp),
            Self::Kana => (0x3040..=0x30FF).contains(&cp) || is_han(cp),
            Self::Hangul => (0xAC00..=0xD7AF).contains(&cp) || (0x1100..=0x11FF).contains(&cp),
            Self::Thai => (0x0E00..=0x0E7F).contains(&cp),
        }
    }

    /// Share of alphabetic characters in `text` that belong to this script.
    ///
    /// Text without any letters scores `1.0` so that numerals and punctuation
    /// never count against a snippet.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(self, text: &str) -> f64 {
        let mut letters = 0usize;
        let mut matching = 0usize;
        for c in text.chars().filter(|c| c.is_alphabetic()) {
            letters += 1;
            if self.contains(c) {
                matching += 1;
            }
        }
        if letters == 0 {
            return 1.0;
        }
        matching as f64 / letters as f64
    }
}

fn is_han(cp: u32) -> bool {
    (0x4E00..=0x9FFF).contains(&cp) || (0x3400..=0x4DBF).contains(&cp)
}
