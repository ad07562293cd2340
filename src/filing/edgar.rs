//! SEC EDGAR client.
//!
//! Resolves a ticker to its CIK via the public company index, walks the
//! company's recent submissions for a 10-K covering the requested fiscal
//! year, and downloads the primary document as plain text.
//!
//! EDGAR requires a declared identity (name and email) in the `User-Agent`
//! header; requests without one are rejected.

use std::collections::HashMap;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, FetchError, ValidationError};
use crate::filing::FilingSource;

const TICKER_INDEX_URL: &str = "https://www.sec.gov/files/company_tickers.json";
const SUBMISSIONS_BASE_URL: &str = "https://data.sec.gov/submissions";
const ARCHIVES_BASE_URL: &str = "https://www.sec.gov/Archives/edgar/data";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Fetches 10-K filings from SEC EDGAR.
pub struct EdgarClient {
    client: reqwest::Client,
}

impl EdgarClient {
    /// Creates a client declaring `identity` (e.g. `"Jane Doe jane@example.com"`)
    /// as the EDGAR `User-Agent`.
    pub fn new(identity: impl Into<String>) -> crate::Result<Self> {
        let identity = identity.into();
        if identity.trim().is_empty() {
            return Err(ValidationError::MissingIdentity.into());
        }

        let client = reqwest::Client::builder()
            .user_agent(identity)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> std::result::Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Http { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn resolve_cik(&self, ticker: &str) -> std::result::Result<u64, FetchError> {
        let index: HashMap<String, TickerEntry> = self.get_json(TICKER_INDEX_URL).await?;
        index
            .values()
            .find(|entry| entry.ticker.eq_ignore_ascii_case(ticker))
            .map(|entry| entry.cik_str)
            .ok_or_else(|| FetchError::UnknownTicker {
                ticker: ticker.to_string(),
            })
    }

    async fn find_annual_report(
        &self,
        cik: u64,
        ticker: &str,
        year: u16,
    ) -> std::result::Result<FilingRef, FetchError> {
        let url = format!("{SUBMISSIONS_BASE_URL}/CIK{cik:010}.json");
        let submissions: Submissions = self.get_json(&url).await?;
        let recent = submissions.filings.recent;

        for (i, form) in recent.form.iter().enumerate() {
            if form != "10-K" {
                continue;
            }
            let Some(date) = recent.filing_date.get(i) else {
                continue;
            };
            let Some(filing_year) = parse_filing_year(date) else {
                continue;
            };
            // A 10-K for fiscal year N is typically filed early in year N+1.
            if filing_year == year || filing_year == year + 1 {
                let accession = recent
                    .accession_number
                    .get(i)
                    .cloned()
                    .unwrap_or_default();
                let primary_document = recent
                    .primary_document
                    .get(i)
                    .cloned()
                    .unwrap_or_default();
                if accession.is_empty() || primary_document.is_empty() {
                    continue;
                }
                debug!(ticker, year, %accession, "found 10-K filing");
                return Ok(FilingRef {
                    accession,
                    primary_document,
                });
            }
        }

        Err(FetchError::NotFound {
            ticker: ticker.to_string(),
            year,
        })
    }

    async fn download_document(
        &self,
        cik: u64,
        filing: &FilingRef,
    ) -> std::result::Result<String, FetchError> {
        let accession = filing.accession.replace('-', "");
        let url = format!(
            "{ARCHIVES_BASE_URL}/{cik}/{accession}/{}",
            filing.primary_document
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Http { status, message });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl FilingSource for EdgarClient {
    async fn fetch(&self, ticker: &str, year: u16) -> std::result::Result<String, FetchError> {
        let cik = self.resolve_cik(ticker).await?;
        let filing = self.find_annual_report(cik, ticker, year).await?;
        let html = self.download_document(cik, &filing).await?;
        let text = html_to_text(&html);
        info!(ticker, year, chars = text.len(), "fetched 10-K text");
        Ok(text)
    }
}

#[derive(Debug, Clone)]
struct FilingRef {
    accession: String,
    primary_document: String,
}

#[derive(Debug, Deserialize)]
struct TickerEntry {
    cik_str: u64,
    ticker: String,
}

#[derive(Debug, Deserialize)]
struct Submissions {
    filings: Filings,
}

#[derive(Debug, Deserialize)]
struct Filings {
    recent: RecentFilings,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentFilings {
    form: Vec<String>,
    filing_date: Vec<String>,
    accession_number: Vec<String>,
    primary_document: Vec<String>,
}

/// Filing dates are `YYYY-MM-DD`; only the year matters here.
fn parse_filing_year(date: &str) -> Option<u16> {
    date.get(..4)?.parse().ok()
}

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {{
        static $name: OnceLock<Regex> = OnceLock::new();
        $name.get_or_init(|| Regex::new($pattern).expect("valid regex"))
    }};
}

/// Strips markup from a filing document, keeping readable text.
fn html_to_text(html: &str) -> String {
    // script/style bodies carry no filing text
    let script_style = static_regex!(
        SCRIPT_STYLE,
        r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>"
    );
    let tags = static_regex!(TAGS, r"(?s)<[^>]*>");

    let without_blocks = script_style.replace_all(html, " ");
    let without_tags = tags.replace_all(&without_blocks, "\n");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#160;", " ")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#8217;", "'");

    let mut lines: Vec<&str> = Vec::new();
    for line in decoded.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }
    lines.join("\n")
}
