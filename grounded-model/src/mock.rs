//! A scripted language model for tests and offline demos.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::stream;

use crate::error::{ModelError, Result};
use crate::llm::{LanguageModel, TextStream};

const PROVIDER: &str = "Mock";

#[derive(Debug, Clone)]
enum Failure {
    Request(String),
    AfterChunks { delivered: usize, message: String },
}

/// A deterministic [`LanguageModel`] that replays a scripted response.
///
/// The response is delivered as a fixed sequence of chunks; concatenating
/// them always equals what [`generate`](LanguageModel::generate) returns.
/// Every call is counted and every prompt recorded so tests can assert on
/// how the model was used.
///
/// # Example
///
/// ```rust,ignore
/// use grounded_model::MockLlm;
///
/// let model = MockLlm::new("mock").with_response("The exhibit is open.");
/// assert_eq!(model.generate("prompt").await?, "The exhibit is open.");
/// assert_eq!(model.calls(), 1);
/// ```
#[derive(Debug)]
pub struct MockLlm {
    name: String,
    chunks: Vec<String>,
    failure: Option<Failure>,
    generate_calls: AtomicUsize,
    stream_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockLlm {
    /// Create a mock that answers with an empty response.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chunks: Vec::new(),
            failure: None,
            generate_calls: AtomicUsize::new(0),
            stream_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Answer with `text`, streamed word by word (whitespace kept with the
    /// preceding word).
    pub fn with_response(mut self, text: impl AsRef<str>) -> Self {
        self.chunks = text.as_ref().split_inclusive(' ').map(str::to_string).collect();
        self
    }

    /// Answer with exactly these chunks.
    pub fn with_chunks<I, S>(mut self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chunks = chunks.into_iter().map(Into::into).collect();
        self
    }

    /// Fail every request before producing output.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(Failure::Request(message.into()));
        self
    }

    /// Deliver the first `delivered` chunks, then fail the stream.
    ///
    /// [`generate`](LanguageModel::generate) fails outright.
    pub fn failing_after(mut self, delivered: usize, message: impl Into<String>) -> Self {
        self.failure = Some(Failure::AfterChunks { delivered, message: message.into() });
        self
    }

    /// Number of [`generate`](LanguageModel::generate) calls.
    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    /// Number of [`generate_stream`](LanguageModel::generate_stream) calls.
    pub fn stream_calls(&self) -> usize {
        self.stream_calls.load(Ordering::SeqCst)
    }

    /// Total number of calls of either kind.
    pub fn calls(&self) -> usize {
        self.generate_calls() + self.stream_calls()
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, prompt: &str) {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).push(prompt.to_string());
    }
}

#[async_trait]
impl LanguageModel for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.record(prompt);

        match &self.failure {
            Some(Failure::Request(message)) | Some(Failure::AfterChunks { message, .. }) => {
                Err(ModelError::Request { provider: PROVIDER.into(), message: message.clone() })
            }
            None => Ok(self.chunks.concat()),
        }
    }

    async fn generate_stream(&self, prompt: &str) -> Result<TextStream> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        self.record(prompt);

        let items: Vec<Result<String>> = match &self.failure {
            Some(Failure::Request(message)) => {
                return Err(ModelError::Request {
                    provider: PROVIDER.into(),
                    message: message.clone(),
                });
            }
            Some(Failure::AfterChunks { delivered, message }) => self
                .chunks
                .iter()
                .take(*delivered)
                .cloned()
                .map(Ok)
                .chain(std::iter::once(Err(ModelError::Stream {
                    provider: PROVIDER.into(),
                    message: message.clone(),
                })))
                .collect(),
            None => self.chunks.iter().cloned().map(Ok).collect(),
        };

        Ok(Box::pin(stream::iter(items)))
    }
}
