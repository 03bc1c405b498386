//! OpenAI client configuration.

/// The chat model used when none is specified.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Configuration for [`OpenAIClient`](super::OpenAIClient).
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAIConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Chat model identifier.
    pub model: String,
    /// Optional organization header.
    pub organization_id: Option<String>,
    /// Base URL override for OpenAI-compatible servers.
    pub base_url: Option<String>,
    /// Sampling temperature. Provider default when unset.
    pub temperature: Option<f32>,
}

impl OpenAIConfig {
    /// Create a config for the standard OpenAI API.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            organization_id: None,
            base_url: None,
            temperature: None,
        }
    }

    /// Create a config for an OpenAI-compatible API (Ollama, vLLM, etc.).
    pub fn compatible(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self { base_url: Some(base_url.into()), ..Self::new(api_key, model) }
    }

    /// Set the organization id.
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
