//! Command-line arguments.

use clap::{Parser, ValueEnum};

/// The question asked when none is given.
pub const DEFAULT_QUERY: &str = "Tell me something about the exhibit";

/// Where embeddings are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Process memory; nothing persists.
    Memory,
    /// PostgreSQL with pgvector at `DATABASE_URL`.
    Pgvector,
}

/// How the answer is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// One complete answer.
    Invoke,
    /// Chunks printed as they arrive.
    Stream,
    /// Invoke, then stream.
    Both,
}

impl Mode {
    /// Whether a complete answer is requested.
    pub fn invokes(self) -> bool {
        matches!(self, Mode::Invoke | Mode::Both)
    }

    /// Whether a streamed answer is requested.
    pub fn streams(self) -> bool {
        matches!(self, Mode::Stream | Mode::Both)
    }
}

/// Answer a question from a small set of neighbourhood notes.
#[derive(Debug, Clone, Parser)]
#[command(name = "grounded", version, about)]
pub struct Cli {
    /// Question to answer.
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Number of documents retrieved as context.
    #[arg(short = 'k', long, default_value_t = 2, value_parser = parse_top_k)]
    pub top_k: usize,

    /// Vector store backend.
    #[arg(long, value_enum, default_value_t = StoreKind::Memory)]
    pub store: StoreKind,

    /// Answer mode.
    #[arg(long, value_enum, default_value_t = Mode::Both)]
    pub mode: Mode,

    /// Print similarity scores for the query before answering.
    #[arg(long)]
    pub show_scores: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

fn parse_top_k(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(k) => Ok(k),
        Err(e) => Err(e.to_string()),
    }
}
