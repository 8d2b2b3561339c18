#![forbid(unsafe_code)]

pub mod ai;
pub mod error;
pub mod prompts;
pub mod sessions;

pub use quiz_core::Clock;

pub use ai::{AiConfig, AiSettings, ChatCompletionGateway, GatewayCache, QuestionGenerator};
pub use error::{GenerationError, QuizError};
pub use prompts::{PromptKind, PromptRequest};
pub use sessions::{
    QUESTIONS_PER_QUIZ, QuizLoopService, QuizPhase, QuizProgress, QuizSession, SubmitOutcome,
    SubmittedAnswer,
};
