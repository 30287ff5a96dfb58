//! Question text normalization.
//!
//! Equality on the normalized form is the only duplicate test in quizwright.
//! Punctuation is significant; no stemming or similarity scoring.

/// Trim, lowercase, and collapse every run of whitespace to a single space.
#[must_use]
pub fn normalize_question_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::normalize_question_text;

    #[rstest]
    #[case("  What is X?  ", "what is x?")]
    #[case("What\tis\n\nX?", "what is x?")]
    #[case("WHAT IS X?", "what is x?")]
    #[case("Mi az   ÁLLAPOT?", "mi az állapot?")]
    #[case("", "")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_question_text(input), expected);
    }

    #[test]
    fn punctuation_is_significant() {
        assert_ne!(
            normalize_question_text("What is X?"),
            normalize_question_text("What is X")
        );
    }
}
