use std::sync::Arc;

use tracing::debug;

use crate::ai::config::AiSettings;
use crate::ai::gateway::ChatCompletionGateway;
use crate::error::QuizError;

/// Lazily built gateway handle, memoized by API key.
///
/// Asking again with the same key hands back the same `Arc`; a different key
/// replaces the cached gateway.
#[derive(Default)]
pub struct GatewayCache {
    settings: AiSettings,
    cached: Option<(String, Arc<ChatCompletionGateway>)>,
}

impl GatewayCache {
    #[must_use]
    pub fn new(settings: AiSettings) -> Self {
        Self {
            settings,
            cached: None,
        }
    }

    /// Return the gateway for `api_key`, building it on first use.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::MissingApiKey` if the key is blank.
    pub fn get_or_init(&mut self, api_key: &str) -> Result<Arc<ChatCompletionGateway>, QuizError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(QuizError::MissingApiKey);
        }

        if let Some((key, gateway)) = &self.cached {
            if key == api_key {
                return Ok(Arc::clone(gateway));
            }
        }

        debug!(model = %self.settings.model, "building chat completion gateway");
        let gateway = Arc::new(ChatCompletionGateway::new(
            self.settings.with_api_key(api_key),
        ));
        self.cached = Some((api_key.to_string(), Arc::clone(&gateway)));
        Ok(gateway)
    }
}
