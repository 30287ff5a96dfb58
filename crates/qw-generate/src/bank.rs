//! Hand-authored question banks for specific (family, language, day) lessons.
//!
//! A bank is a TOML document:
//!
//! ```toml
//! name = "prompt-craft-en-day1"
//! family = "prompt-craft"
//! languages = ["en"]
//! days = [1]
//! rank = 100            # optional, higher is tried first
//!
//! [[questions]]
//! type = "application"  # or "critical_thinking"
//! difficulty = "easy"   # optional, derived from the day otherwise
//! text = "..."
//! correct = "..."
//! distractors = ["...", "...", "..."]
//! ```

use std::path::Path;
use std::sync::Arc;

use qw_core::{Difficulty, DifficultyTier, QuestionType};
use serde::Deserialize;

use crate::GenerationRequest;
use crate::draft::{Draft, difficulty_for};
use crate::error::GenerateError;
use crate::strategy::GenerationStrategy;
use crate::templates::LanguageTemplates;

const BUILTIN_BANKS: &[(&str, &str)] = &[(
    "prompt-craft-en-day1.toml",
    include_str!("../banks/prompt-craft-en-day1.toml"),
)];

const fn default_rank() -> u32 {
    100
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BankQuestion {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub text: String,
    pub correct: String,
    pub distractors: [String; 3],
}

/// A bespoke pool of questions for a set of lessons.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionBank {
    pub name: String,
    pub family: String,
    pub languages: Vec<String>,
    pub days: Vec<u32>,
    #[serde(default = "default_rank")]
    pub rank: u32,
    pub questions: Vec<BankQuestion>,
}

impl QuestionBank {
    /// Parse and validate a bank from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::Parse` for malformed TOML and
    /// `GenerateError::InvalidBank` when a content rule is broken.
    pub fn from_toml_str(source: &str, origin: &Path) -> Result<Self, GenerateError> {
        let bank: Self = toml::from_str(source).map_err(|source| GenerateError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        bank.validate()?;
        Ok(bank)
    }

    fn validate(&self) -> Result<(), GenerateError> {
        let invalid = |reason: String| GenerateError::InvalidBank {
            name: self.name.clone(),
            reason,
        };
        if self.family.trim().is_empty() {
            return Err(invalid("family must not be empty".into()));
        }
        if self.languages.is_empty() || self.days.is_empty() {
            return Err(invalid("languages and days must not be empty".into()));
        }
        if self.questions.is_empty() {
            return Err(invalid("bank has no questions".into()));
        }
        for (i, q) in self.questions.iter().enumerate() {
            if q.question_type == QuestionType::Recall {
                return Err(invalid(format!("question {i} is a recall question")));
            }
            if q.text.trim().is_empty() || q.correct.trim().is_empty() {
                return Err(invalid(format!("question {i} has an empty text or answer")));
            }
        }
        Ok(())
    }

    fn serves_language(&self, language: &str) -> bool {
        let base = language.split(['-', '_']).next().unwrap_or(language);
        self.languages
            .iter()
            .any(|l| l.eq_ignore_ascii_case(language) || l.eq_ignore_ascii_case(base))
    }
}

/// Banks compiled into the binary.
///
/// # Errors
///
/// Returns an error only if a built-in bank is itself malformed.
pub fn builtin_banks() -> Result<Vec<QuestionBank>, GenerateError> {
    BUILTIN_BANKS
        .iter()
        .map(|(name, source)| QuestionBank::from_toml_str(source, Path::new(name)))
        .collect()
}

/// Load every `*.toml` bank in `dir`, in file-name order.
///
/// # Errors
///
/// Returns `GenerateError::Io` if the directory cannot be listed or a file
/// cannot be read, and parse/validation errors for bad banks.
pub fn load_dir(dir: &Path) -> Result<Vec<QuestionBank>, GenerateError> {
    let io_err = |path: &Path, source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let path = entry.map_err(|e| io_err(dir, e))?.path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut banks = Vec::with_capacity(paths.len());
    for path in paths {
        let source = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        banks.push(QuestionBank::from_toml_str(&source, &path)?);
    }
    tracing::debug!(dir = %dir.display(), count = banks.len(), "loaded question banks");
    Ok(banks)
}

/// Strategy serving one bank.
#[derive(Debug, Clone)]
pub struct BankStrategy {
    bank: Arc<QuestionBank>,
    surplus: usize,
}

impl BankStrategy {
    #[must_use]
    pub fn new(bank: QuestionBank, surplus: usize) -> Self {
        Self {
            bank: Arc::new(bank),
            surplus,
        }
    }

    #[must_use]
    pub fn rank(&self) -> u32 {
        self.bank.rank
    }
}

impl GenerationStrategy for BankStrategy {
    fn name(&self) -> &str {
        &self.bank.name
    }

    fn matches(&self, request: &GenerationRequest<'_>) -> bool {
        self.bank.family == request.course_family
            && self.bank.days.contains(&request.day_number)
            && self.bank.serves_language(request.language)
    }

    fn drafts(
        &self,
        request: &GenerationRequest<'_>,
        _templates: &dyn LanguageTemplates,
    ) -> Vec<Draft> {
        let tier = DifficultyTier::for_day(request.day_number);
        self.bank
            .questions
            .iter()
            .map(|q| Draft {
                text: q.text.clone(),
                correct: q.correct.clone(),
                distractors: q.distractors.clone(),
                question_type: q.question_type,
                difficulty: q
                    .difficulty
                    .unwrap_or_else(|| difficulty_for(tier, q.question_type)),
            })
            .collect()
    }

    fn surplus(&self) -> usize {
        self.surplus
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BANK: &str = r#"
name = "negotiation-hu-day2"
family = "negotiation"
languages = ["hu"]
days = [2, 3]

[[questions]]
type = "critical_thinking"
difficulty = "hard"
text = "Miért veszélyes az első ajánlatot azonnal elfogadni?"
correct = "Mert lemondasz az alku lehetőségéről"
distractors = ["Mert udvariatlan", "Mert törvénybe ütközik", "Mert mindig túl magas"]
"#;

    #[test]
    fn parses_bank_with_default_rank() {
        let bank = QuestionBank::from_toml_str(BANK, Path::new("inline.toml")).unwrap();
        assert_eq!(bank.rank, 100);
        assert_eq!(bank.questions.len(), 1);
        assert_eq!(bank.questions[0].difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn recall_questions_are_rejected() {
        let source = BANK.replace("critical_thinking", "recall");
        let err = QuestionBank::from_toml_str(&source, Path::new("inline.toml")).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidBank { .. }));
        assert!(err.to_string().contains("recall"));
    }

    #[test]
    fn wrong_distractor_count_is_a_parse_error() {
        let source = BANK.replace(", \"Mert mindig túl magas\"", "");
        let err = QuestionBank::from_toml_str(&source, Path::new("inline.toml")).unwrap_err();
        assert!(matches!(err, GenerateError::Parse { .. }));
    }

    #[test]
    fn matches_family_day_and_language() {
        let bank = QuestionBank::from_toml_str(BANK, Path::new("inline.toml")).unwrap();
        let strategy = BankStrategy::new(bank, 4);
        let mut request = GenerationRequest {
            day_number: 3,
            title: "Alku",
            content: "",
            language: "hu-HU",
            course_id: "negotiation-hu",
            course_family: "negotiation",
        };
        assert!(strategy.matches(&request));
        request.day_number = 4;
        assert!(!strategy.matches(&request));
        request.day_number = 2;
        request.language = "en";
        assert!(!strategy.matches(&request));
    }

    #[test]
    fn builtin_banks_are_valid() {
        let banks = builtin_banks().unwrap();
        assert!(!banks.is_empty());
        for bank in &banks {
            let ct = bank
                .questions
                .iter()
                .filter(|q| q.question_type == QuestionType::CriticalThinking)
                .count();
            assert!(ct >= 2, "{} needs critical-thinking items", bank.name);
            assert!(bank.questions.len() >= 7, "{} is below a full pool", bank.name);
        }
    }

    #[test]
    fn load_dir_reads_toml_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.toml"), BANK).unwrap();
        std::fs::write(
            dir.path().join("a.toml"),
            BANK.replace("negotiation-hu-day2", "first"),
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_dir(dir.path()).unwrap();
        let names: Vec<_> = banks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["first", "negotiation-hu-day2"]);
    }
}
