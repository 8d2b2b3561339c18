use serde::{Deserialize, Serialize};

/// One answered question in a quiz, in the order it was answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
}

impl ResponseRecord {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        user_answer: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            user_answer: user_answer.into(),
            correct_answer: correct_answer.into(),
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.user_answer == self.correct_answer
    }
}
