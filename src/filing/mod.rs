//! Filing retrieval.
//!
//! Documents reach the pipeline through the [`FilingSource`] trait, so the
//! pipeline can be driven from canned text in tests. The production source
//! is [`EdgarClient`], which pulls annual reports from SEC EDGAR.

use async_trait::async_trait;

use crate::error::FetchError;

pub mod edgar;

pub use edgar::EdgarClient;

/// A source of annual-report text for a ticker and fiscal year.
#[async_trait]
pub trait FilingSource: Send + Sync {
    /// Returns the plain text of the company's 10-K covering `year`.
    async fn fetch(&self, ticker: &str, year: u16) -> std::result::Result<String, FetchError>;
}
