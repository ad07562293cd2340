//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};

/// Default model for new queries.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// TENK-RS: ask questions about SEC 10-K filings.
///
/// Fetches a company's annual report from SEC EDGAR, splits it into
/// token-bounded chunks, answers the question against each chunk with an
/// LLM, and synthesizes the partial answers into one.
#[derive(Parser, Debug)]
#[command(name = "tenk-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question about a company's 10-K filing.
    Ask {
        /// Stock ticker symbol (e.g. AAPL).
        ticker: String,

        /// Fiscal year of the filing (e.g. 2023).
        year: u16,

        /// The question to answer.
        question: String,

        /// Anthropic model to use.
        #[arg(short, long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Anthropic API key.
        #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Identity declared to SEC EDGAR (name and email).
        #[arg(long, env = "EDGAR_IDENTITY")]
        identity: Option<String>,

        /// Maximum tokens per chunk.
        #[arg(long, default_value = "4000")]
        chunk_tokens: usize,

        /// Completion budget for each per-chunk answer.
        #[arg(long, default_value = "1024")]
        answer_tokens: u32,

        /// Completion budget for the synthesis call.
        #[arg(long, default_value = "2048")]
        synthesis_tokens: u32,

        /// Include per-chunk partial answers in the output.
        #[arg(long)]
        show_partials: bool,
    },

    /// List known Anthropic models.
    Models,
}
