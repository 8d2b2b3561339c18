use std::sync::Arc;

use quiz_core::model::Question;
use tracing::{info, warn};

use super::service::{QuizPhase, QuizSession, SubmittedAnswer};
use crate::Clock;
use crate::ai::QuestionGenerator;
use crate::error::QuizError;
use crate::prompts::PromptRequest;

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub answer: SubmittedAnswer,
    pub is_complete: bool,
}

/// Drives a `QuizSession` through start and submit, one generator call per step.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    generator: Arc<dyn QuestionGenerator>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, generator: Arc<dyn QuestionGenerator>) -> Self {
        Self { clock, generator }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Generate the opening question for `topic` and start the quiz.
    ///
    /// The session is left untouched on any error.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` unless the session is `NotStarted`,
    /// `QuizError::EmptyTopic` for a blank topic, and `QuizError::Generation`
    /// if the question could not be generated.
    pub async fn start<'s>(
        &self,
        session: &'s mut QuizSession,
        topic: &str,
    ) -> Result<&'s Question, QuizError> {
        session.ensure_not_started()?;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(QuizError::EmptyTopic);
        }

        let question = self
            .generator
            .generate_question(&PromptRequest::initial(topic))
            .await
            .inspect_err(|err| warn!(error = %err, topic, "opening question failed"))?;

        session.begin(topic, question, self.clock.now())?;
        info!(topic, "quiz started");
        session.current_question().ok_or(QuizError::NotInProgress)
    }

    /// Judge the answer to the current question and fetch the next one.
    ///
    /// The answer is always recorded first. If the follow-up question cannot be
    /// generated, or repeats an earlier one, the quiz ends early and the error
    /// is returned; the answered question stays as `current_question`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` unless a question is waiting for an
    /// answer. Returns `QuizError::Generation` or `QuizError::DuplicateQuestion`
    /// when the quiz was ended early.
    pub async fn submit(
        &self,
        session: &mut QuizSession,
        user_answer: &str,
    ) -> Result<SubmitOutcome, QuizError> {
        let answer = session.record_answer(user_answer, self.clock.now())?;

        if session.phase() == QuizPhase::InProgress {
            let request = PromptRequest::adaptive(
                session.topic().unwrap_or_default(),
                &answer.response.question,
                user_answer,
                answer.is_correct,
            );

            let next = self
                .generator
                .generate_question(&request)
                .await
                .map_err(QuizError::from)
                .and_then(|question| session.accept_next(question));

            if let Err(err) = next {
                warn!(
                    error = %err,
                    question_number = session.question_number(),
                    "ending quiz early"
                );
                session.end_early(self.clock.now());
                return Err(err);
            }
        } else {
            info!(
                score = session.score(),
                answered = session.responses().len(),
                "quiz completed"
            );
        }

        Ok(SubmitOutcome {
            answer,
            is_complete: session.is_complete(),
        })
    }
}
