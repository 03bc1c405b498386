//! Retrieval-augmented answer chain.
//!
//! The [`RagChain`] runs one strictly sequential flow per question:
//! retrieve → assemble prompt → generate. It answers either in one piece
//! ([`answer`](RagChain::answer)) or as a lazy stream of text chunks
//! ([`answer_stream`](RagChain::answer_stream)).
//!
//! # Example
//!
//! ```rust,ignore
//! use grounded_rag::{RagChain, Retriever};
//!
//! let chain = RagChain::builder()
//!     .retriever(retriever)
//!     .model(Arc::new(model))
//!     .build()?;
//!
//! let answer = chain.answer("Tell me something about the exhibit").await?;
//!
//! let mut stream = chain.answer_stream("Tell me something about the exhibit");
//! while let Some(chunk) = stream.next().await {
//!     print!("{}", chunk?);
//! }
//! ```

use std::pin::Pin;
use std::sync::Arc;

use async_stream::try_stream;
use futures::{Stream, StreamExt};
use grounded_model::{LanguageModel, ModelError};
use tracing::{error, info};

use crate::document::Document;
use crate::error::{RagError, Result};
use crate::prompt::PromptTemplate;
use crate::retriever::Retriever;

/// A lazy, finite stream of answer chunks. Not restartable.
pub type AnswerStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// The retrieved documents and the prompt built from them.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedPrompt {
    /// Retrieved documents, best match first.
    pub documents: Vec<Document>,
    /// The assembled prompt.
    pub prompt: String,
}

/// The RAG orchestrator.
///
/// Holds only shared, immutable collaborators, so a chain can be cloned and
/// used from concurrent tasks; calls share no state. There is no retry, no
/// fallback answer and no caching across calls. Construct one via
/// [`RagChain::builder()`].
#[derive(Clone)]
pub struct RagChain {
    retriever: Retriever,
    template: Arc<PromptTemplate>,
    model: Arc<dyn LanguageModel>,
}

impl RagChain {
    /// Create a new [`RagChainBuilder`].
    pub fn builder() -> RagChainBuilder {
        RagChainBuilder::default()
    }

    /// Retrieve context for `question` and assemble the prompt, without
    /// calling the model.
    ///
    /// # Errors
    ///
    /// Returns the retriever's error ([`RagError::RetrievalError`] or
    /// [`RagError::InvalidInput`]).
    pub async fn prepare(&self, question: &str) -> Result<PreparedPrompt> {
        let results = self.retriever.retrieve(question).await?;
        let documents: Vec<Document> = results.into_iter().map(|r| r.document).collect();
        let prompt = self.template.assemble(question, &documents);
        Ok(PreparedPrompt { documents, prompt })
    }

    /// Answer `question` in one piece.
    ///
    /// # Errors
    ///
    /// Retrieval failures abort before the model is called. Model failures
    /// are returned as [`RagError::GenerationError`]; no partial answer is
    /// returned.
    pub async fn answer(&self, question: &str) -> Result<String> {
        let prepared = self.prepare(question).await?;

        let answer = self.model.generate(&prepared.prompt).await.map_err(|e| {
            error!(model = self.model.name(), error = %e, "generation failed");
            generation_error(self.model.name(), e)
        })?;

        info!(
            model = self.model.name(),
            document_count = prepared.documents.len(),
            answer_len = answer.len(),
            "answered question"
        );
        Ok(answer)
    }

    /// Answer `question` as a stream of text chunks.
    ///
    /// Nothing happens until the stream is first polled. Chunks are yielded
    /// in generation order and the stream ends when the model finishes.
    /// A retrieval or model failure is yielded as a single `Err` item, after
    /// which the stream ends; chunks already yielded remain valid. Dropping
    /// the stream stops generation.
    pub fn answer_stream(&self, question: &str) -> AnswerStream {
        let chain = self.clone();
        let question = question.to_string();

        let stream = try_stream! {
            let prepared = chain.prepare(&question).await?;

            let mut chunks = chain.model.generate_stream(&prepared.prompt).await.map_err(|e| {
                error!(model = chain.model.name(), error = %e, "generation stream failed to start");
                generation_error(chain.model.name(), e)
            })?;

            let mut chunk_count = 0usize;
            while let Some(chunk) = chunks.next().await {
                let chunk = chunk.map_err(|e| {
                    error!(
                        model = chain.model.name(),
                        chunk_count,
                        error = %e,
                        "generation stream failed"
                    );
                    generation_error(chain.model.name(), e)
                })?;
                if chunk.is_empty() {
                    continue;
                }
                chunk_count += 1;
                yield chunk;
            }

            info!(
                model = chain.model.name(),
                document_count = prepared.documents.len(),
                chunk_count,
                "streamed answer"
            );
        };

        Box::pin(stream)
    }
}

fn generation_error(model: &str, e: ModelError) -> RagError {
    RagError::GenerationError { model: model.to_string(), message: e.to_string() }
}

/// Builder for constructing a [`RagChain`].
///
/// `retriever` and `model` are required; the template defaults to
/// [`DEFAULT_TEMPLATE`](crate::prompt::DEFAULT_TEMPLATE).
#[derive(Default)]
pub struct RagChainBuilder {
    retriever: Option<Retriever>,
    template: Option<PromptTemplate>,
    model: Option<Arc<dyn LanguageModel>>,
}

impl RagChainBuilder {
    /// Set the retriever.
    pub fn retriever(mut self, retriever: Retriever) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Set the prompt template.
    pub fn template(mut self, template: PromptTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Set the language model.
    pub fn model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Build the [`RagChain`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `retriever` or `model` is missing.
    pub fn build(self) -> Result<RagChain> {
        let retriever = self
            .retriever
            .ok_or_else(|| RagError::ConfigError("retriever is required".to_string()))?;
        let model =
            self.model.ok_or_else(|| RagError::ConfigError("model is required".to_string()))?;

        Ok(RagChain {
            retriever,
            template: Arc::new(self.template.unwrap_or_default()),
            model,
        })
    }
}
