//! Error types for the `grounded-model` crate.

use thiserror::Error;

/// Errors that can occur while talking to a language model provider.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The provider was configured with invalid or missing values.
    #[error("Model configuration error: {0}")]
    Config(String),

    /// The request to the provider failed before any output was produced.
    #[error("Model request error ({provider}): {message}")]
    Request {
        /// The provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The provider failed while a response stream was being consumed.
    #[error("Model stream error ({provider}): {message}")]
    Stream {
        /// The provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
