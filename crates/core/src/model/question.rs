use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,

    #[error("expected {expected} options, got {actual}")]
    OptionCount { expected: usize, actual: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },
}

//
// ─── DIFFICULTY ───────────────────────────────────────────────────────────────
//

/// Difficulty requested from the model for the next question.
///
/// - `Medium`: the opening question of a quiz
/// - `Harder`: the previous answer was correct
/// - `Easier`: the previous answer was wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Medium,
    Harder,
    Easier,
}

impl Difficulty {
    /// Difficulty of the question that follows an answer.
    #[must_use]
    pub fn after_answer(was_correct: bool) -> Self {
        if was_correct { Self::Harder } else { Self::Easier }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Medium => "Medium",
            Difficulty::Harder => "Harder",
            Difficulty::Easier => "Easier",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A generated multiple-choice question.
///
/// Always holds exactly four options, and `answer` is one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    text: String,
    options: Vec<String>,
    answer: String,
    explanation: Option<String>,
}

impl Question {
    /// Build a question, trimming surrounding whitespace from every field.
    ///
    /// A blank explanation is stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, there are not exactly four
    /// non-blank options, or the answer does not match an option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(QuestionError::EmptyText);
        }

        if options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::OptionCount {
                expected: OPTIONS_PER_QUESTION,
                actual: options.len(),
            });
        }
        let options: Vec<String> = options
            .into_iter()
            .map(|option| option.trim().to_string())
            .collect();
        if let Some(index) = options.iter().position(String::is_empty) {
            return Err(QuestionError::EmptyOption { index });
        }

        let answer = answer.into().trim().to_string();
        if !options.contains(&answer) {
            return Err(QuestionError::AnswerNotInOptions { answer });
        }

        let explanation = explanation
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Self {
            text,
            options,
            answer,
            explanation,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Exact comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, user_answer: &str) -> bool {
        self.answer == user_answer
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
