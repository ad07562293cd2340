//! The chunk-and-synthesize answering pipeline.
//!
//! A query flows through four stages: fetch the filing, partition it into
//! token-bounded chunks, answer the question against each chunk in order,
//! then reduce the partial answers to one [`FinalAnswer`](crate::core::FinalAnswer).

pub mod analyzer;
pub mod answerer;
pub mod prompt;
pub mod synthesizer;

pub use analyzer::{Analyzer, AnalyzerOptions};

/// Default completion budget for a per-chunk answer.
pub const DEFAULT_ANSWER_BUDGET_TOKENS: u32 = 1024;

/// Default completion budget for the synthesis call.
pub const DEFAULT_SYNTHESIS_BUDGET_TOKENS: u32 = 2048;
