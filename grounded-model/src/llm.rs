//! The language model provider trait.

use std::pin::Pin;

use async_trait::async_trait;
use futures::{Stream, StreamExt};

use crate::error::Result;

/// A finite, pull-based stream of generated text chunks.
///
/// Chunks arrive in generation order. Dropping the stream stops further
/// production; chunks already yielded stay valid.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// A provider that turns a prompt into generated text.
///
/// Implementations wrap a specific backend (OpenAI, a local server, a test
/// double) behind a unified async interface. The default
/// [`generate`](LanguageModel::generate) implementation drains
/// [`generate_stream`](LanguageModel::generate_stream) and concatenates the
/// chunks; backends with a dedicated non-streaming endpoint should override it.
///
/// # Example
///
/// ```rust,ignore
/// use grounded_model::LanguageModel;
///
/// let answer = model.generate("What is Rust?").await?;
///
/// let mut stream = model.generate_stream("What is Rust?").await?;
/// while let Some(chunk) = stream.next().await {
///     print!("{}", chunk?);
/// }
/// ```
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// The model identifier (e.g. `gpt-4o-mini`).
    fn name(&self) -> &str;

    /// Generate a complete answer for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut stream = self.generate_stream(prompt).await?;
        let mut text = String::new();
        while let Some(chunk) = stream.next().await {
            text.push_str(&chunk?);
        }
        Ok(text)
    }

    /// Generate an answer for `prompt` as a stream of text chunks.
    async fn generate_stream(&self, prompt: &str) -> Result<TextStream>;
}
