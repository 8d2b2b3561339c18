use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ResponseRecord;
use crate::time::as_secs_f64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("{answered} responses recorded for a {total}-question quiz")]
    TooManyResponses { answered: usize, total: u32 },
}

/// Final report of a finished quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    topic: String,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    score: u32,
    total_questions: u32,
    total_seconds: f64,
    responses: Vec<ResponseRecord>,
}

impl QuizSummary {
    /// Build a summary from the ordered response log.
    ///
    /// The score is the number of correct responses.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `QuizSummaryError::TooManyResponses` if more responses than questions were logged.
    pub fn from_responses(
        topic: impl Into<String>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        total_questions: u32,
        responses: Vec<ResponseRecord>,
    ) -> Result<Self, QuizSummaryError> {
        if completed_at < started_at {
            return Err(QuizSummaryError::InvalidTimeRange);
        }
        let answered = responses.len();
        if u32::try_from(answered).map_or(true, |n| n > total_questions) {
            return Err(QuizSummaryError::TooManyResponses {
                answered,
                total: total_questions,
            });
        }

        let correct = responses.iter().filter(|r| r.is_correct()).count();
        let score = u32::try_from(correct).unwrap_or(u32::MAX);

        Ok(Self {
            topic: topic.into(),
            started_at,
            completed_at,
            score,
            total_questions,
            total_seconds: as_secs_f64(completed_at - started_at),
            responses,
        })
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    #[must_use]
    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    /// Whether the quiz ended before every question was answered.
    #[must_use]
    pub fn ended_early(&self) -> bool {
        self.responses.len() < self.total_questions as usize
    }
}
