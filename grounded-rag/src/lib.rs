//! # grounded-rag
//!
//! Retrieval-augmented generation: store documents with embeddings, retrieve
//! the ones most similar to a question, ground a prompt in them, and answer
//! with a language model.
//!
//! ## Overview
//!
//! - [`EmbeddingProvider`] - text to vector ([`OpenAIEmbeddingProvider`] with
//!   the `openai` feature)
//! - [`VectorStore`] - vector storage and cosine search ([`InMemoryVectorStore`],
//!   [`PgVectorStore`] with the `pgvector` feature)
//! - [`DocumentStore`] - one embedded collection
//! - [`Retriever`] - top-k retrieval with input and result validation
//! - [`PromptTemplate`] - `{question}` / `{context}` prompt assembly
//! - [`RagChain`] - retrieve → assemble → generate, whole or streamed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use grounded_rag::{DocumentStore, InMemoryVectorStore, RagChain, RagConfig, Retriever};
//!
//! let store = DocumentStore::from_documents(
//!     &documents,
//!     Arc::new(embedder),
//!     Arc::new(InMemoryVectorStore::new()),
//!     "my_docs",
//! )
//! .await?;
//!
//! let chain = RagChain::builder()
//!     .retriever(Retriever::new(Arc::new(store), RagConfig::default()))
//!     .model(Arc::new(model))
//!     .build()?;
//!
//! println!("{}", chain.answer("Tell me something about the exhibit").await?);
//! ```

pub mod chain;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod inmemory;
#[cfg(feature = "openai")]
pub mod openai;
#[cfg(feature = "pgvector")]
pub mod pgvector;
pub mod prompt;
pub mod retriever;
pub mod store;
pub mod vectorstore;

pub use chain::{AnswerStream, PreparedPrompt, RagChain, RagChainBuilder};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Document, EmbeddedDocument, MetadataValue, SearchResult};
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use inmemory::InMemoryVectorStore;
#[cfg(feature = "openai")]
pub use openai::OpenAIEmbeddingProvider;
#[cfg(feature = "pgvector")]
pub use pgvector::{PgVectorConfig, PgVectorStore};
pub use prompt::{DEFAULT_TEMPLATE, PromptTemplate, format_documents};
pub use retriever::Retriever;
pub use store::{DocumentStore, DocumentStoreBuilder};
pub use vectorstore::VectorStore;
