use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quiz_core::model::Question;

use crate::ai::config::AiConfig;
use crate::ai::parse::parse_question;
use crate::error::GenerationError;
use crate::prompts::PromptRequest;

/// Source of generated questions.
///
/// One call is one attempt: implementations must not retry internally.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate_question(
        &self,
        request: &PromptRequest,
    ) -> Result<Question, GenerationError>;
}

/// `QuestionGenerator` backed by an OpenAI-compatible chat completion endpoint.
#[derive(Clone)]
pub struct ChatCompletionGateway {
    client: Client,
    config: AiConfig,
}

impl ChatCompletionGateway {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.settings.model
    }

    /// Send one prompt and return the trimmed message content.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the request fails, the endpoint answers
    /// with a non-success status, or the response has no content.
    pub async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let settings = &self.config.settings;
        let payload = ChatRequest {
            model: settings.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: settings.temperature,
        };

        debug!(model = %settings.model, prompt_len = prompt.len(), "sending chat completion");
        let response = self
            .client
            .post(settings.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        if let Some(usage) = &body.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "chat completion usage"
            );
        }

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(content)
    }
}

#[async_trait]
impl QuestionGenerator for ChatCompletionGateway {
    async fn generate_question(
        &self,
        request: &PromptRequest,
    ) -> Result<Question, GenerationError> {
        let content = self.complete(&request.render()).await?;
        parse_question(&content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}
