mod question;
mod response;
mod summary;

pub use question::{Difficulty, OPTIONS_PER_QUESTION, Question, QuestionError};
pub use response::ResponseRecord;
pub use summary::{QuizSummary, QuizSummaryError};
