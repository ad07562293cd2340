//! Core domain types for tenk-rs.
//!
//! Contains the fundamental data structures a filing query flows through:
//! the validated request, per-chunk partial answers, and the final answer.

pub mod answer;
pub mod query;

pub use answer::{ChunkOutcome, FinalAnswer, PartialAnswer};
pub use query::QueryRequest;
