//! Token-partition chunker.
//!
//! Splits text by index-bounded slicing over the encoded token array rather
//! than incremental accumulation, which makes the "last chunk may be short"
//! invariant explicit.

use std::fmt;

use tiktoken_rs::CoreBPE;

use crate::error::{ChunkingError, Result};
use crate::tokenizer::encoding_for_model;

/// Chunker that partitions text into token-bounded segments.
///
/// The encoding is chosen per model identifier, with a general-purpose
/// fallback for unrecognized models (see [`crate::tokenizer`]). A chunk
/// boundary may fall inside a multi-token linguistic unit; each group still
/// decodes independently, at worst with an imperfect visual seam. That is an
/// accepted approximation, not a bug.
///
/// # Examples
///
/// ```
/// use tenk_rs::chunking::TokenChunker;
///
/// let chunker = TokenChunker::for_model("gpt-4").unwrap();
/// let text = "Revenue grew in every segment. ".repeat(100);
/// let chunks = chunker.chunk(&text, 50).unwrap();
/// for chunk in &chunks {
///     assert!(chunker.count_tokens(chunk) <= 50);
/// }
/// ```
pub struct TokenChunker {
    /// Model identifier the encoding was resolved for.
    model: String,
    /// The resolved byte-pair encoding.
    bpe: CoreBPE,
}

impl fmt::Debug for TokenChunker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenChunker")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl TokenChunker {
    /// Creates a chunker using the encoding for `model`.
    ///
    /// Unrecognized models fall back to the default encoding rather than
    /// failing.
    ///
    /// # Errors
    ///
    /// Returns an error only if no encoding at all can be constructed.
    pub fn for_model(model: &str) -> Result<Self> {
        Ok(Self {
            model: model.to_string(),
            bpe: encoding_for_model(model)?,
        })
    }

    /// Returns the model identifier this chunker was built for.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Counts tokens in `text` under this chunker's encoding.
    #[must_use]
    pub fn count_tokens(&self, text: &str) -> usize {
        crate::tokenizer::count_tokens(&self.bpe, text)
    }

    /// Partitions `text` into chunks of at most `max_chunk_tokens` tokens.
    ///
    /// The token stream is sliced into ordered groups of exactly
    /// `max_chunk_tokens`, the last group holding the remainder
    /// (1..=`max_chunk_tokens` tokens). Each group decodes back to text
    /// independently. Empty input yields zero chunks.
    ///
    /// Deterministic: the same `(text, max_chunk_tokens)` always produces
    /// identical chunks.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidConfig`] when `max_chunk_tokens` is
    /// zero, or [`ChunkingError::Decode`] if a token group does not decode
    /// to valid text.
    pub fn chunk(&self, text: &str, max_chunk_tokens: usize) -> Result<Vec<String>> {
        if max_chunk_tokens == 0 {
            return Err(ChunkingError::InvalidConfig {
                reason: "max_chunk_tokens must be > 0".to_string(),
            }
            .into());
        }

        if text.is_empty() {
            return Ok(vec![]);
        }

        let tokens = self.bpe.encode_with_special_tokens(text);

        tokens
            .chunks(max_chunk_tokens)
            .enumerate()
            .map(|(index, group)| {
                self.bpe
                    .decode(group.to_vec())
                    .map_err(|e| {
                        ChunkingError::Decode {
                            index,
                            reason: e.to_string(),
                        }
                        .into()
                    })
            })
            .collect()
    }
}
