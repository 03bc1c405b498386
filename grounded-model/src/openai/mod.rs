//! OpenAI chat completion provider.
//!
//! This module is only available when the `openai` feature is enabled.
//!
//! # Example
//!
//! ```rust,ignore
//! use grounded_model::openai::{OpenAIClient, OpenAIConfig};
//!
//! let model = OpenAIClient::new(OpenAIConfig::new(
//!     std::env::var("OPENAI_API_KEY")?,
//!     "gpt-4o-mini",
//! ))?;
//! ```

mod client;
mod config;

pub use client::OpenAIClient;
pub use config::{DEFAULT_CHAT_MODEL, OpenAIConfig};
