//! # TENK-RS
//!
//! Ask questions about SEC 10-K filings from the command line.
//!
//! TENK-RS fetches a company's annual report from SEC EDGAR, partitions it
//! into token-bounded chunks that fit an LLM context window, answers the
//! question against each chunk independently, and synthesizes the partial
//! answers into a single response.
//!
//! ## Features
//!
//! - **EDGAR retrieval**: ticker-to-CIK resolution and 10-K download
//! - **Token chunking**: exact partition using the model's own tokenizer
//! - **Failure tolerance**: one failed chunk call never aborts the run
//! - **Graceful degradation**: synthesis failures fall back to concatenation

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chunking;
pub mod cli;
pub mod core;
pub mod error;
pub mod filing;
pub mod llm;
pub mod pipeline;
pub mod tokenizer;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use crate::core::{ChunkOutcome, FinalAnswer, PartialAnswer, QueryRequest};

// Re-export chunking types
pub use chunking::{DEFAULT_MAX_CHUNK_TOKENS, TokenChunker};

// Re-export source traits and clients
pub use filing::{EdgarClient, FilingSource};
pub use llm::{AnthropicClient, LlmService};

// Re-export pipeline types
pub use pipeline::{Analyzer, AnalyzerOptions};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
