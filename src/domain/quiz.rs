//! Quiz question bank.
//!
//! Questions are authored outside the engine and are read-only to it. A bank
//! is loaded from TOML, either the built-in one shipped with the plugin or a
//! user-provided file, and validated once at load time so the engine can rely
//! on every question having exactly one correct option.

use crate::domain::error::{CipherdeckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Built-in bank, mirrored from the curiosities page.
const BUILTIN_BANK: &str = include_str!("../../quizzes/builtin.toml");

/// One answer option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    #[serde(default)]
    pub correct: bool,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    /// Index of the correct option.
    ///
    /// Banks are validated on load, so this is `Some` for any question coming
    /// out of a [`QuestionBank`].
    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.correct)
    }
}

/// Ordered, validated set of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<QuizQuestion>,
}

impl QuestionBank {
    /// Builds a bank from already-parsed questions.
    ///
    /// # Errors
    ///
    /// Returns [`CipherdeckError::Config`] if the bank is empty, a question has
    /// fewer than two options, or a question does not have exactly one correct
    /// option.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self> {
        if questions.is_empty() {
            return Err(CipherdeckError::Config("quiz bank has no questions".to_string()));
        }

        for (idx, question) in questions.iter().enumerate() {
            if question.options.len() < 2 {
                return Err(CipherdeckError::Config(format!(
                    "question {} needs at least two options",
                    idx + 1
                )));
            }
            let correct = question.options.iter().filter(|o| o.correct).count();
            if correct != 1 {
                return Err(CipherdeckError::Config(format!(
                    "question {} has {correct} correct options, expected exactly one",
                    idx + 1
                )));
            }
        }

        Ok(Self { questions })
    }

    /// Parses a bank from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CipherdeckError::Config`] on TOML syntax errors or validation
    /// failures.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct BankFile {
            questions: Vec<QuizQuestion>,
        }

        let file: BankFile = toml::from_str(contents)
            .map_err(|e| CipherdeckError::Config(format!("failed to parse quiz TOML: {e}")))?;
        Self::new(file.questions)
    }

    /// Loads a bank from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CipherdeckError::Io`] if the file cannot be read, otherwise the
    /// errors of [`QuestionBank::from_toml_str`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Questions in display order.
    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Number of questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false` for a validated bank; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionBank {
    /// Returns the built-in three-question bank.
    ///
    /// # Panics
    ///
    /// Panics if the bundled bank fails to parse (should never occur).
    fn default() -> Self {
        Self::from_toml_str(BUILTIN_BANK).expect("built-in quiz bank should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_bank_has_three_valid_questions() {
        let bank = QuestionBank::default();
        assert_eq!(bank.len(), 3);
        assert!(bank.questions().iter().all(|q| q.correct_index().is_some()));
    }

    #[test]
    fn rejects_question_without_correct_option() {
        let err = QuestionBank::from_toml_str(
            r#"
            [[questions]]
            prompt = "?"
            options = [{ label = "a" }, { label = "b" }]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CipherdeckError::Config(_)));
    }

    #[test]
    fn rejects_two_correct_options_and_single_option() {
        let two_correct = r#"
            [[questions]]
            prompt = "?"
            options = [{ label = "a", correct = true }, { label = "b", correct = true }]
        "#;
        assert!(QuestionBank::from_toml_str(two_correct).is_err());

        let single = r#"
            [[questions]]
            prompt = "?"
            options = [{ label = "a", correct = true }]
        "#;
        assert!(QuestionBank::from_toml_str(single).is_err());
        assert!(QuestionBank::new(vec![]).is_err());
    }

    #[test]
    fn loads_bank_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [[questions]]
            prompt = "Who wrote the first treatise on frequency analysis?"
            options = [{{ label = "Al-Kindi", correct = true }}, {{ label = "Vigenère" }}]
            "#
        )
        .unwrap();

        let bank = QuestionBank::from_file(file.path()).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.questions()[0].correct_index(), Some(0));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = QuestionBank::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CipherdeckError::Io(_)));
    }
}
