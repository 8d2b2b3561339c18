pub mod cache;
pub mod config;
pub mod gateway;
pub mod parse;

pub use cache::GatewayCache;
pub use config::{AiConfig, AiSettings};
pub use gateway::{ChatCompletionGateway, QuestionGenerator};
pub use parse::parse_question;
