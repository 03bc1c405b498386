//! # grounded-cli
//!
//! Command-line demo for grounded question answering: embeds ten short
//! notes, stores them in memory or in PostgreSQL/pgvector, shows which ones
//! a question retrieves, and answers it with an OpenAI chat model, first in
//! one piece and then streamed.
//!
//! ```text
//! grounded --query "Tell me something about the exhibit" -k 2 --store pgvector
//! ```

pub mod app;
pub mod cli;
pub mod data;
pub mod settings;
pub mod telemetry;

pub use cli::Cli;
pub use settings::Settings;
