//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, QuizSummaryError};

/// Errors emitted while generating a question through the model endpoint.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("question request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("model response did not contain a JSON object")]
    MissingJson,
    #[error("model response is not valid question JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model returned no questions")]
    NoQuestions,
    #[error("model returned an invalid question: {0}")]
    InvalidQuestion(#[from] QuestionError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by quiz transitions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("enter an API key to start the quiz")]
    MissingApiKey,
    #[error("enter a topic to start the quiz")]
    EmptyTopic,
    #[error("quiz already started")]
    AlreadyStarted,
    #[error("no question is waiting for an answer")]
    NotInProgress,
    #[error("quiz is not finished yet")]
    NotCompleted,
    #[error("model repeated an earlier question: {text}")]
    DuplicateQuestion { text: String },
    #[error("failed to generate a question: {0}")]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Summary(#[from] QuizSummaryError),
}
