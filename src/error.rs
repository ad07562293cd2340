//! Error types for tenk-rs operations.
//!
//! This module provides the error hierarchy using `thiserror` for the fatal
//! error classes: validation, fetch, empty-document, and chunking failures.
//!
//! LLM call failures are deliberately *not* part of [`Error`]: a failed
//! per-chunk call is absorbed into that chunk's partial answer, and a failed
//! synthesis call degrades to concatenated partial answers. Those paths carry
//! [`LlmError`] values inside pipeline results instead of aborting the query.

use thiserror::Error;

/// Result type alias for tenk-rs operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal error classes for a filing query.
///
/// Only these abort the pipeline; everything downstream of chunking degrades
/// into the final answer instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing user input. No collaborator is contacted.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The filing source could not produce text.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The filing was retrieved but its text is empty.
    #[error("10-K for {ticker} ({year}) was retrieved but contains no text")]
    EmptyDocument {
        /// Ticker symbol of the empty filing.
        ticker: String,
        /// Fiscal year requested.
        year: u16,
    },

    /// Chunking-related errors (tokenization and partitioning).
    #[error("chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    /// Configuration errors (collaborator construction).
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Input validation errors, surfaced before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ticker symbol was empty or whitespace.
    #[error("ticker symbol must not be empty")]
    EmptyTicker,

    /// Question was empty or whitespace.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// Year outside the plausible filing range.
    #[error("implausible fiscal year {year} (expected {min}-{max})")]
    ImplausibleYear {
        /// The rejected year.
        year: u16,
        /// Earliest accepted year.
        min: u16,
        /// Latest accepted year.
        max: u16,
    },

    /// API credential was empty or whitespace.
    #[error("API key must not be empty (set ANTHROPIC_API_KEY or pass --api-key)")]
    MissingApiKey,

    /// EDGAR identity (contact for the User-Agent header) was empty.
    #[error(
        "EDGAR identity must not be empty (set EDGAR_IDENTITY or pass --identity; \
         SEC requires a contact in the User-Agent)"
    )]
    MissingIdentity,
}

/// Filing-source errors. Fatal for the query that hit them.
#[derive(Error, Debug)]
pub enum FetchError {
    /// No 10-K exists for the requested ticker and year.
    #[error("no 10-K found for {ticker} fiscal year {year}")]
    NotFound {
        /// Ticker symbol that was looked up.
        ticker: String,
        /// Fiscal year requested.
        year: u16,
    },

    /// Ticker symbol is not in the EDGAR company index.
    #[error("unknown ticker: {ticker}")]
    UnknownTicker {
        /// Ticker symbol that was looked up.
        ticker: String,
    },

    /// Transport-level failure reaching the filing source.
    #[error("network error: {0}")]
    Network(String),

    /// The filing source answered with a non-success status.
    #[error("filing source returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The filing source answered with a body we could not interpret.
    #[error("malformed filing source response: {0}")]
    Decode(String),
}

/// Chunking-specific errors for token partitioning.
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// Invalid chunk configuration.
    #[error("invalid chunk configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration is invalid.
        reason: String,
    },

    /// Tokenizer could not be constructed for any encoding.
    #[error("tokenizer unavailable: {0}")]
    Tokenizer(String),

    /// A token group failed to decode back to text.
    #[error("chunk {index} failed to decode: {reason}")]
    Decode {
        /// Zero-based index of the chunk that failed.
        index: usize,
        /// Decoder failure description.
        reason: String,
    },
}

/// LLM service errors, classified per call.
///
/// Never converted into [`Error`]: the pipeline records these inside partial
/// answers (chunk calls) or falls back to concatenation (synthesis call).
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The service is rate limiting us; an ordinary per-chunk failure.
    #[error("rate limited (retry after {retry_after_secs}s)")]
    RateLimited {
        /// Suggested back-off in seconds.
        retry_after_secs: u64,
    },

    /// Credential rejected by the service.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Non-success status from the API.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body returned by the service.
        message: String,
    },

    /// Response parsed but carried no usable text.
    #[error("model returned no text content")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::EmptyTicker.to_string(),
            "ticker symbol must not be empty"
        );
        let err = ValidationError::ImplausibleYear {
            year: 42,
            min: 1993,
            max: 2100,
        };
        assert!(err.to_string().contains("42"));
        assert!(err.to_string().contains("1993"));
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::NotFound {
            ticker: "ZZZZ".to_string(),
            year: 2023,
        };
        assert_eq!(err.to_string(), "no 10-K found for ZZZZ fiscal year 2023");

        let err = FetchError::Http {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_empty_document_display() {
        let err = Error::EmptyDocument {
            ticker: "ACME".to_string(),
            year: 2023,
        };
        assert!(err.to_string().contains("ACME"));
        assert!(err.to_string().contains("no text"));
    }

    #[test]
    fn test_chunking_error_display() {
        let err = ChunkingError::InvalidConfig {
            reason: "max_chunk_tokens must be > 0".to_string(),
        };
        assert!(err.to_string().contains("max_chunk_tokens"));

        let err = ChunkingError::Decode {
            index: 3,
            reason: "invalid utf-8".to_string(),
        };
        assert!(err.to_string().contains("chunk 3"));
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::RateLimited {
            retry_after_secs: 5,
        };
        assert!(err.to_string().contains("rate limited"));

        let err = LlmError::Api {
            status: 529,
            message: "overloaded".to_string(),
        };
        assert!(err.to_string().contains("529"));
        assert!(err.to_string().contains("overloaded"));
    }

    #[test]
    fn test_error_from_validation() {
        let err: Error = ValidationError::EmptyQuestion.into();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_error_from_fetch() {
        let err: Error = FetchError::Network("timeout".to_string()).into();
        assert!(matches!(err, Error::Fetch(_)));
    }

    #[test]
    fn test_error_from_chunking() {
        let err: Error = ChunkingError::Tokenizer("missing vocab".to_string()).into();
        assert!(matches!(err, Error::Chunking(_)));
    }

    #[test]
    fn test_fatal_classes_are_distinct() {
        // The user-visible taxonomy keeps "could not even try" classes apart.
        let validation: Error = ValidationError::EmptyTicker.into();
        let fetch: Error = FetchError::Network("down".to_string()).into();
        let empty = Error::EmptyDocument {
            ticker: "ACME".to_string(),
            year: 2023,
        };
        assert!(validation.to_string().starts_with("validation error"));
        assert!(fetch.to_string().starts_with("fetch error"));
        assert!(!empty.to_string().starts_with("fetch error"));
    }
}
