//! # grounded-model
//!
//! Language model providers for grounded question answering.
//!
//! ## Overview
//!
//! Every provider implements [`LanguageModel`], which turns a prompt into
//! either a complete answer or a stream of text chunks:
//!
//! - [`OpenAIClient`] - OpenAI chat models (GPT-4o, GPT-4o-mini, etc.) and
//!   OpenAI-compatible servers (requires the `openai` feature)
//! - [`MockLlm`] - scripted model for tests and offline runs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grounded_model::openai::{OpenAIClient, OpenAIConfig};
//! use grounded_model::LanguageModel;
//!
//! let model = OpenAIClient::new(OpenAIConfig::new(
//!     std::env::var("OPENAI_API_KEY")?,
//!     "gpt-4o-mini",
//! ))?;
//! let answer = model.generate("Say hello in one word.").await?;
//! ```

pub mod error;
pub mod llm;
pub mod mock;
#[cfg(feature = "openai")]
pub mod openai;

pub use error::{ModelError, Result};
pub use llm::{LanguageModel, TextStream};
pub use mock::MockLlm;
#[cfg(feature = "openai")]
pub use openai::{OpenAIClient, OpenAIConfig};
