//! OpenAI client implementation.

use async_openai::{
    Client,
    config::OpenAIConfig as AsyncOpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, error};

use super::config::OpenAIConfig;
use crate::error::{ModelError, Result};
use crate::llm::{LanguageModel, TextStream};

const PROVIDER: &str = "OpenAI";

/// OpenAI client for the standard OpenAI API and OpenAI-compatible APIs.
///
/// Each prompt is sent as a single user message.
pub struct OpenAIClient {
    client: Client<AsyncOpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAIClient {
    /// Create a new OpenAI client.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Config`] if the API key or model is empty.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(ModelError::Config("OpenAI API key must not be empty".into()));
        }
        if config.model.is_empty() {
            return Err(ModelError::Config("OpenAI model must not be empty".into()));
        }

        let mut openai_config = AsyncOpenAIConfig::new().with_api_key(&config.api_key);

        if let Some(org_id) = &config.organization_id {
            openai_config = openai_config.with_org_id(org_id);
        }

        if let Some(base_url) = &config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        Ok(Self {
            client: Client::with_config(openai_config),
            model: config.model,
            temperature: config.temperature,
        })
    }

    fn build_request(&self, prompt: &str) -> Result<CreateChatCompletionRequest> {
        let message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| request_error(format!("failed to build message: {e}")))?
            .into();

        let mut request_builder = CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(vec![message]);
        if let Some(temperature) = self.temperature {
            request_builder.temperature(temperature);
        }

        request_builder.build().map_err(|e| request_error(format!("failed to build request: {e}")))
    }
}

fn request_error(message: String) -> ModelError {
    ModelError::Request { provider: PROVIDER.into(), message }
}

#[async_trait]
impl LanguageModel for OpenAIClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(provider = PROVIDER, model = %self.model, prompt_len = prompt.len(), "generating");

        let request = self.build_request(prompt)?;
        let response = self.client.chat().create(request).await.map_err(|e| {
            error!(provider = PROVIDER, error = %e, "chat completion failed");
            request_error(format!("OpenAI API error: {e}"))
        })?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| request_error("API returned no message content".into()))
    }

    async fn generate_stream(&self, prompt: &str) -> Result<TextStream> {
        debug!(provider = PROVIDER, model = %self.model, prompt_len = prompt.len(), "streaming");

        let request = self.build_request(prompt)?;
        let mut upstream = self.client.chat().create_stream(request).await.map_err(|e| {
            error!(provider = PROVIDER, error = %e, "chat completion stream failed to open");
            request_error(format!("OpenAI API error: {e}"))
        })?;

        let stream = try_stream! {
            while let Some(result) = upstream.next().await {
                let chunk = result.map_err(|e| {
                    error!(provider = PROVIDER, error = %e, "stream error");
                    ModelError::Stream { provider: PROVIDER.into(), message: e.to_string() }
                })?;
                for choice in chunk.choices {
                    if let Some(content) = choice.delta.content {
                        if !content.is_empty() {
                            yield content;
                        }
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        let result = OpenAIClient::new(OpenAIConfig::new("", "gpt-4o-mini"));
        assert!(matches!(result, Err(ModelError::Config(_))));
    }

    #[test]
    fn rejects_empty_model() {
        let result = OpenAIClient::new(OpenAIConfig::new("sk-test", ""));
        assert!(matches!(result, Err(ModelError::Config(_))));
    }

    #[test]
    fn builds_single_user_message_request() {
        let client =
            OpenAIClient::new(OpenAIConfig::new("sk-test", "gpt-4o-mini").with_temperature(0.0))
                .unwrap();
        let request = client.build_request("hello").unwrap();
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 1);
        assert!(matches!(request.messages[0], ChatCompletionRequestMessage::User(_)));
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(client.name(), "gpt-4o-mini");
    }
}
