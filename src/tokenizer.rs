//! Tokenizer lookup for model-aware chunk sizing.
//!
//! Maps a model identifier to a byte-pair encoding via `tiktoken-rs`. Models
//! without a dedicated encoding fall back to `cl100k_base`, which is a close
//! enough approximation for context budgeting against Claude-family models.
//! The fallback is a recoverable condition, never a hard failure.

use tiktoken_rs::{CoreBPE, cl100k_base, get_bpe_from_model};
use tracing::debug;

use crate::error::{ChunkingError, Result};

/// Returns the encoding for a model identifier.
///
/// Pure lookup: tries the model's dedicated encoding first and substitutes
/// the default `cl100k_base` encoding when the identifier is unrecognized.
/// No process-wide state is consulted or mutated.
///
/// # Errors
///
/// Returns [`ChunkingError::Tokenizer`] only if the default encoding itself
/// cannot be constructed, which indicates a broken vocabulary build.
pub fn encoding_for_model(model: &str) -> Result<CoreBPE> {
    match get_bpe_from_model(model) {
        Ok(bpe) => Ok(bpe),
        Err(_) => {
            debug!(model, "no dedicated encoding; falling back to cl100k_base");
            cl100k_base().map_err(|e| ChunkingError::Tokenizer(e.to_string()).into())
        }
    }
}

/// Counts tokens in `text` under the given encoding.
#[must_use]
pub fn count_tokens(bpe: &CoreBPE, text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    bpe.encode_with_special_tokens(text).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_resolves() {
        // gpt-4 has a dedicated tiktoken encoding.
        let bpe = encoding_for_model("gpt-4").unwrap();
        assert!(count_tokens(&bpe, "Hello, world!") > 0);
    }

    #[test]
    fn test_unknown_model_falls_back() {
        let bpe = encoding_for_model("claude-3-5-sonnet-20241022").unwrap();
        let default = cl100k_base().unwrap();
        let text = "Net revenue increased 12% year over year.";
        assert_eq!(
            bpe.encode_with_special_tokens(text),
            default.encode_with_special_tokens(text)
        );
    }

    #[test]
    fn test_count_tokens_empty() {
        let bpe = encoding_for_model("anything").unwrap();
        assert_eq!(count_tokens(&bpe, ""), 0);
    }

    #[test]
    fn test_count_tokens_simple() {
        let bpe = encoding_for_model("gpt-4").unwrap();
        let count = count_tokens(&bpe, "Hello, world!");
        assert!(count > 0);
        assert!(count < 10);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let bpe = encoding_for_model("gpt-4").unwrap();
        let text = "Risk factors include supply chain concentration.";
        let tokens = bpe.encode_with_special_tokens(text);
        let decoded = bpe.decode(tokens).unwrap();
        assert_eq!(decoded, text);
    }
}
