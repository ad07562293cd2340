//! Token-bounded chunking for filing text.
//!
//! A filing is split into contiguous groups of tokens so each group fits a
//! model's context budget. Chunks partition the token stream exactly: no
//! overlap, no gaps, original order preserved, and only the final chunk may
//! hold fewer than the maximum number of tokens.

pub mod token;

pub use token::TokenChunker;

/// Default chunk bound in tokens. Leaves room for the prompt scaffolding and
/// the answer budget inside one model context.
pub const DEFAULT_MAX_CHUNK_TOKENS: usize = 4000;
