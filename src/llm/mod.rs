//! LLM access.
//!
//! The pipeline talks to models through the [`LlmService`] trait so that
//! answering and synthesis can be exercised against scripted services in
//! tests. The production implementation is [`AnthropicClient`].

use async_trait::async_trait;

use crate::error::LlmError;

pub mod anthropic;

pub use anthropic::AnthropicClient;

/// A service that turns a single prompt into a single completion.
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Sends one prompt to `model` and returns the completion text.
    ///
    /// Errors are [`LlmError`], deliberately separate from the crate-level
    /// error type: callers decide whether a failed call is fatal.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> std::result::Result<String, LlmError>;
}
