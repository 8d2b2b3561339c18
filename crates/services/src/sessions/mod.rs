mod progress;
mod service;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::QuizError;
pub use progress::QuizProgress;
pub use service::{QUESTIONS_PER_QUIZ, QuizPhase, QuizSession, SubmittedAnswer};
pub use workflow::{QuizLoopService, SubmitOutcome};
