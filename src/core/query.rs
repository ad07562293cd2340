//! Query request and input validation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Earliest plausible fiscal year (EDGAR's electronic filing era).
pub const MIN_FILING_YEAR: u16 = 1993;

/// Latest plausible fiscal year.
pub const MAX_FILING_YEAR: u16 = 2100;

/// One question against one company's 10-K filing.
///
/// Validation happens before any collaborator is contacted; an invalid
/// request never causes network activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Stock ticker symbol (e.g. "AAPL"). Normalized to upper case.
    pub ticker: String,

    /// Fiscal year the 10-K covers.
    pub year: u16,

    /// The natural-language question to answer.
    pub question: String,

    /// Model identifier to query.
    pub model: String,
}

impl QueryRequest {
    /// Creates a request, normalizing the ticker to upper case.
    #[must_use]
    pub fn new(ticker: &str, year: u16, question: &str, model: &str) -> Self {
        Self {
            ticker: ticker.trim().to_uppercase(),
            year,
            question: question.trim().to_string(),
            model: model.to_string(),
        }
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: empty ticker, empty question, or a
    /// year outside [`MIN_FILING_YEAR`]..=[`MAX_FILING_YEAR`].
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.ticker.trim().is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        if self.question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        if !(MIN_FILING_YEAR..=MAX_FILING_YEAR).contains(&self.year) {
            return Err(ValidationError::ImplausibleYear {
                year: self.year,
                min: MIN_FILING_YEAR,
                max: MAX_FILING_YEAR,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request() {
        let req = QueryRequest::new("AAPL", 2023, "What are the risk factors?", "claude-3-5-sonnet-20241022");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_ticker_normalized_to_uppercase() {
        let req = QueryRequest::new(" aapl ", 2023, "q", "m");
        assert_eq!(req.ticker, "AAPL");
    }

    #[test]
    fn test_empty_ticker_rejected() {
        let req = QueryRequest::new("  ", 2023, "question", "m");
        assert_eq!(req.validate(), Err(ValidationError::EmptyTicker));
    }

    #[test]
    fn test_empty_question_rejected() {
        let req = QueryRequest::new("AAPL", 2023, "   ", "m");
        assert_eq!(req.validate(), Err(ValidationError::EmptyQuestion));
    }

    #[test]
    fn test_implausible_year_rejected() {
        let req = QueryRequest::new("AAPL", 42, "question", "m");
        assert!(matches!(
            req.validate(),
            Err(ValidationError::ImplausibleYear { year: 42, .. })
        ));

        let req = QueryRequest::new("AAPL", 2101, "question", "m");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_boundary_years_accepted() {
        assert!(QueryRequest::new("AAPL", 1993, "q", "m").validate().is_ok());
        assert!(QueryRequest::new("AAPL", 2100, "q", "m").validate().is_ok());
    }
}
