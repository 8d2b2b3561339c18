use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use quiz_core::model::{Question, QuizSummary, ResponseRecord};

use super::progress::QuizProgress;
use crate::error::QuizError;

/// Questions asked in one quiz.
pub const QUESTIONS_PER_QUIZ: u32 = 5;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Where a quiz is in its lifecycle, derived from the question number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Question number 0. Waiting for a topic.
    NotStarted,
    /// Question number 1 through 5. A question is waiting for an answer.
    InProgress,
    /// Question number past 5. Only `reset` leaves this phase.
    Completed,
}

//
// ─── SUBMITTED ANSWER ──────────────────────────────────────────────────────────
//

/// What the user answered and how it was judged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedAnswer {
    pub response: ResponseRecord,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State of one user's quiz.
///
/// Owned by the caller and handed to `QuizLoopService` by `&mut` for each
/// transition. Timestamps come from the services layer clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizSession {
    question_number: u32,
    score: u32,
    current_question: Option<Question>,
    topic: Option<String>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    responses: Vec<ResponseRecord>,
    asked_questions: HashSet<String>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match self.question_number {
            0 => QuizPhase::NotStarted,
            n if n <= QUESTIONS_PER_QUIZ => QuizPhase::InProgress,
            _ => QuizPhase::Completed,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase() == QuizPhase::Completed
    }

    /// 0 before start, 1..=5 while answering, 6 once finished.
    #[must_use]
    pub fn question_number(&self) -> u32 {
        self.question_number
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    /// Texts of every question shown so far.
    #[must_use]
    pub fn asked_questions(&self) -> &HashSet<String> {
        &self.asked_questions
    }

    /// Time from start to completion. Zero until the quiz is complete.
    #[must_use]
    pub fn total_time(&self) -> Duration {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => end - start,
            _ => Duration::zero(),
        }
    }

    /// Live timer: time since start, frozen once the quiz completes.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        match self.started_at {
            Some(start) => self.completed_at.unwrap_or(now) - start,
            None => Duration::zero(),
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            question_number: self.question_number,
            answered: self.responses.len(),
            total: QUESTIONS_PER_QUIZ,
            score: self.score,
            is_complete: self.is_complete(),
        }
    }

    /// Final report of a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotCompleted` before the quiz has finished.
    pub fn summary(&self) -> Result<QuizSummary, QuizError> {
        let (Some(started_at), Some(completed_at)) = (self.started_at, self.completed_at) else {
            return Err(QuizError::NotCompleted);
        };
        if !self.is_complete() {
            return Err(QuizError::NotCompleted);
        }
        Ok(QuizSummary::from_responses(
            self.topic.clone().unwrap_or_default(),
            started_at,
            completed_at,
            QUESTIONS_PER_QUIZ,
            self.responses.clone(),
        )?)
    }

    /// Drop everything and return to `NotStarted`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn ensure_not_started(&self) -> Result<(), QuizError> {
        match self.phase() {
            QuizPhase::NotStarted => Ok(()),
            QuizPhase::InProgress | QuizPhase::Completed => Err(QuizError::AlreadyStarted),
        }
    }

    /// Record the opening question and start the timer.
    pub(crate) fn begin(
        &mut self,
        topic: &str,
        question: Question,
        now: DateTime<Utc>,
    ) -> Result<(), QuizError> {
        self.ensure_not_started()?;
        self.asked_questions.insert(question.text().to_string());
        self.current_question = Some(question);
        self.topic = Some(topic.to_string());
        self.question_number = 1;
        self.started_at = Some(now);
        Ok(())
    }

    /// Judge `user_answer` against the current question and advance the number.
    ///
    /// Answering the last question completes the quiz at `now`.
    pub(crate) fn record_answer(
        &mut self,
        user_answer: &str,
        now: DateTime<Utc>,
    ) -> Result<SubmittedAnswer, QuizError> {
        if self.phase() != QuizPhase::InProgress {
            return Err(QuizError::NotInProgress);
        }
        let question = self
            .current_question
            .as_ref()
            .ok_or(QuizError::NotInProgress)?;

        let is_correct = question.is_correct(user_answer);
        let response = ResponseRecord::new(question.text(), user_answer, question.answer());
        let explanation = question.explanation().map(str::to_string);

        if is_correct {
            self.score += 1;
        }
        self.responses.push(response.clone());
        self.question_number += 1;
        if self.question_number > QUESTIONS_PER_QUIZ {
            self.complete_at(now);
        }

        Ok(SubmittedAnswer {
            response,
            is_correct,
            explanation,
        })
    }

    /// Install the next question unless its text was already asked.
    pub(crate) fn accept_next(&mut self, question: Question) -> Result<(), QuizError> {
        if self.asked_questions.contains(question.text()) {
            return Err(QuizError::DuplicateQuestion {
                text: question.text().to_string(),
            });
        }
        self.asked_questions.insert(question.text().to_string());
        self.current_question = Some(question);
        Ok(())
    }

    /// Jump straight to `Completed`, keeping the score and log so far.
    pub(crate) fn end_early(&mut self, now: DateTime<Utc>) {
        self.question_number = QUESTIONS_PER_QUIZ + 1;
        if self.completed_at.is_none() {
            self.complete_at(now);
        }
    }

    /// Stop the timer. Never before the start, even if the clock stepped back.
    fn complete_at(&mut self, now: DateTime<Utc>) {
        if let Some(start) = self.started_at {
            self.completed_at = Some(now.max(start));
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    fn question(text: &str) -> Question {
        Question::new(
            text,
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            "a",
            Some(format!("{text} explained")),
        )
        .unwrap()
    }

    fn started() -> QuizSession {
        let mut session = QuizSession::new();
        session.begin("Algebra", question("Q1"), fixed_now()).unwrap();
        session
    }

    #[test]
    fn new_session_is_not_started() {
        let session = QuizSession::new();
        assert_eq!(session.phase(), QuizPhase::NotStarted);
        assert_eq!(session.question_number(), 0);
        assert_eq!(session.total_time(), Duration::zero());
        assert!(matches!(session.summary(), Err(QuizError::NotCompleted)));
    }

    #[test]
    fn begin_records_question_and_start() {
        let session = started();
        assert_eq!(session.phase(), QuizPhase::InProgress);
        assert_eq!(session.question_number(), 1);
        assert_eq!(session.topic(), Some("Algebra"));
        assert_eq!(session.started_at(), Some(fixed_now()));
        assert!(session.asked_questions().contains("Q1"));
    }

    #[test]
    fn begin_twice_is_rejected() {
        let mut session = started();
        let err = session.begin("Other", question("Q9"), fixed_now()).unwrap_err();
        assert!(matches!(err, QuizError::AlreadyStarted));
        assert_eq!(session.topic(), Some("Algebra"));
    }

    #[test]
    fn answer_before_start_is_rejected() {
        let mut session = QuizSession::new();
        let err = session.record_answer("a", fixed_now()).unwrap_err();
        assert!(matches!(err, QuizError::NotInProgress));
        assert!(session.responses().is_empty());
    }

    #[test]
    fn correct_answer_scores_and_advances() {
        let mut session = started();
        let answer = session.record_answer("a", fixed_now()).unwrap();

        assert!(answer.is_correct);
        assert_eq!(answer.explanation.as_deref(), Some("Q1 explained"));
        assert_eq!(answer.response, ResponseRecord::new("Q1", "a", "a"));
        assert_eq!(session.score(), 1);
        assert_eq!(session.question_number(), 2);
    }

    #[test]
    fn answer_outside_options_counts_as_wrong() {
        let mut session = started();
        let answer = session.record_answer("zzz", fixed_now()).unwrap();

        assert!(!answer.is_correct);
        assert_eq!(session.score(), 0);
        assert_eq!(session.question_number(), 2);
        assert_eq!(session.progress().answered, 1);
    }

    #[test]
    fn duplicate_question_is_rejected() {
        let mut session = started();
        session.record_answer("a", fixed_now()).unwrap();

        let err = session.accept_next(question("Q1")).unwrap_err();
        assert!(matches!(err, QuizError::DuplicateQuestion { ref text } if text == "Q1"));
        assert_eq!(session.asked_questions().len(), 1);
    }

    #[test]
    fn fifth_answer_completes_with_total_time() {
        let mut session = started();
        let mut now = fixed_now();
        for n in 1..=QUESTIONS_PER_QUIZ {
            now += Duration::seconds(7);
            session.record_answer("a", now).unwrap();
            if n < QUESTIONS_PER_QUIZ {
                session.accept_next(question(&format!("Q{}", n + 1))).unwrap();
            }
        }

        assert_eq!(session.phase(), QuizPhase::Completed);
        assert_eq!(session.question_number(), 6);
        assert_eq!(session.total_time(), Duration::seconds(35));
        assert_eq!(session.elapsed(now + Duration::hours(1)), Duration::seconds(35));

        let summary = session.summary().unwrap();
        assert_eq!(summary.score(), 5);
        assert_eq!(summary.responses().len(), 5);
        assert!((summary.total_seconds() - 35.0).abs() < f64::EPSILON);
        assert!(matches!(
            session.record_answer("a", now),
            Err(QuizError::NotInProgress)
        ));
    }

    #[test]
    fn end_early_jumps_to_completed() {
        let mut session = started();
        session.record_answer("b", fixed_now()).unwrap();
        session.end_early(fixed_now() + Duration::seconds(3));

        assert_eq!(session.phase(), QuizPhase::Completed);
        assert_eq!(session.question_number(), 6);
        assert_eq!(session.responses().len(), 1);
        assert_eq!(session.total_time(), Duration::seconds(3));
        assert!(session.summary().unwrap().ended_early());
    }

    #[test]
    fn clock_stepping_back_still_yields_a_summary() {
        let mut session = started();
        session.record_answer("a", fixed_now()).unwrap();
        session.end_early(fixed_now() - Duration::seconds(2));

        assert_eq!(session.total_time(), Duration::zero());
        let summary = session.summary().unwrap();
        assert_eq!(summary.score(), 1);
        assert!(summary.total_seconds().abs() < f64::EPSILON);
    }

    #[test]
    fn reset_restores_defaults_from_any_phase() {
        let mut fresh = QuizSession::new();
        fresh.reset();
        assert_eq!(fresh, QuizSession::default());

        let mut in_progress = started();
        in_progress.record_answer("a", fixed_now()).unwrap();
        in_progress.reset();
        assert_eq!(in_progress, QuizSession::default());

        let mut completed = started();
        completed.end_early(fixed_now());
        completed.reset();
        assert_eq!(completed, QuizSession::default());
        assert_eq!(completed.score(), 0);
        assert!(completed.responses().is_empty());
        assert!(completed.asked_questions().is_empty());
    }
}
