use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const BASE_URL_ENV: &str = "QUIZ_AI_BASE_URL";
pub const MODEL_ENV: &str = "QUIZ_AI_MODEL";

/// Endpoint settings that do not depend on the user's API key.
#[derive(Clone, Debug, PartialEq)]
pub struct AiSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl AiSettings {
    /// Defaults overridden by `QUIZ_AI_BASE_URL` and `QUIZ_AI_MODEL` when set.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            base_url: non_blank(BASE_URL_ENV).unwrap_or(defaults.base_url),
            model: non_blank(MODEL_ENV).unwrap_or(defaults.model),
            temperature: defaults.temperature,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Combine with a user-supplied key into a full gateway config.
    #[must_use]
    pub fn with_api_key(&self, api_key: impl Into<String>) -> AiConfig {
        AiConfig {
            settings: self.clone(),
            api_key: api_key.into(),
        }
    }

    /// `{base_url}/chat/completions`, tolerating a trailing slash.
    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Clone)]
pub struct AiConfig {
    pub settings: AiSettings,
    pub api_key: String,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("settings", &self.settings)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_overrides_defaults() {
        let settings = AiSettings::from_lookup(|key| match key {
            BASE_URL_ENV => Some("http://localhost:8080/v1/".into()),
            MODEL_ENV => Some("tiny-model".into()),
            _ => None,
        });

        assert_eq!(settings.model, "tiny-model");
        assert_eq!(
            settings.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let settings = AiSettings::from_lookup(|_| Some("  ".into()));
        assert_eq!(settings, AiSettings::default());
        assert_eq!(
            settings.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn config_debug_hides_key() {
        let config = AiSettings::default().with_api_key("gsk_secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("gsk_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
