//! Anthropic Messages API client.
//!
//! Uses the native Messages endpoint with `x-api-key` header authentication
//! and the `anthropic-version` header. Only single-turn user prompts are
//! sent; the response is the joined text of all text content blocks.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, LlmError, ValidationError};
use crate::llm::LlmService;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const REQUEST_TIMEOUT_SECS: u64 = 300;
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Client for Anthropic's Messages API.
pub struct AnthropicClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicClient {
    /// Creates a client for the given API key.
    ///
    /// Rejects blank keys up front so a misconfigured environment fails
    /// before any document is fetched or chunked.
    pub fn new(api_key: impl Into<String>) -> crate::Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ValidationError::MissingApiKey.into());
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key,
            client,
        })
    }

    /// Overrides the API base URL, e.g. for a proxy.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn extract_text(resp: MessagesResponse) -> std::result::Result<String, LlmError> {
        let mut text = String::new();
        for block in resp.content {
            if let ResponseContentBlock::Text { text: t } = block {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&t);
            }
        }
        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Honors a numeric `Retry-After` header; HTTP-date values and absent or
/// malformed headers fall back to the default back-off.
fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[async_trait]
impl LlmService for AnthropicClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> std::result::Result<String, LlmError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = serde_json::json!({
            "model": model,
            "max_tokens": max_tokens,
            "messages": [{"role": "user", "content": prompt}],
        });

        debug!(model, max_tokens, "sending messages request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(LlmError::RateLimited {
                retry_after_secs: retry_after_secs(response.headers()),
            });
        }
        if status == 401 || status == 403 {
            return Err(LlmError::Authentication("invalid API key".into()));
        }
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            warn!(status, body = %message, "messages API error");
            return Err(LlmError::Api { status, message });
        }

        let api_resp: MessagesResponse =
            response.json().await.map_err(|e| LlmError::Api {
                status: 200,
                message: format!("failed to parse response: {e}"),
            })?;

        Self::extract_text(api_resp)
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ResponseContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_rejects_blank_key() {
        assert!(AnthropicClient::new("").is_err());
        assert!(AnthropicClient::new("   ").is_err());
        assert!(AnthropicClient::new("sk-ant-test").is_ok());
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let client = AnthropicClient::new("sk-ant-test")
            .unwrap()
            .with_base_url("https://proxy.example.com/");
        assert_eq!(client.base_url, "https://proxy.example.com");
    }

    #[test]
    fn test_parse_text_response() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{
                "id": "msg_01",
                "model": "claude-3-5-sonnet-20241022",
                "content": [{"type": "text", "text": "Net revenue was $383B."}],
                "usage": {"input_tokens": 10, "output_tokens": 5}
            }"#,
        )
        .unwrap();
        let text = AnthropicClient::extract_text(resp).unwrap();
        assert_eq!(text, "Net revenue was $383B.");
    }

    #[test]
    fn test_parse_joins_multiple_text_blocks() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{
                "content": [
                    {"type": "text", "text": "First."},
                    {"type": "text", "text": "Second."}
                ]
            }"#,
        )
        .unwrap();
        let text = AnthropicClient::extract_text(resp).unwrap();
        assert_eq!(text, "First.\nSecond.");
    }

    #[test]
    fn test_parse_ignores_unknown_blocks() {
        let resp: MessagesResponse = serde_json::from_str(
            r#"{
                "content": [
                    {"type": "thinking", "thinking": "hmm"},
                    {"type": "text", "text": "Answer."}
                ]
            }"#,
        )
        .unwrap();
        let text = AnthropicClient::extract_text(resp).unwrap();
        assert_eq!(text, "Answer.");
    }

    #[test]
    fn test_retry_after_header_is_honored() {
        use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};

        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_static("17"));
        assert_eq!(retry_after_secs(&headers), 17);

        headers.insert(RETRY_AFTER, HeaderValue::from_static(" 3 "));
        assert_eq!(retry_after_secs(&headers), 3);
    }

    #[test]
    fn test_retry_after_falls_back_when_missing_or_malformed() {
        use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};

        let headers = HeaderMap::new();
        assert_eq!(retry_after_secs(&headers), DEFAULT_RETRY_AFTER_SECS);

        let mut headers = HeaderMap::new();
        headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );
        assert_eq!(retry_after_secs(&headers), DEFAULT_RETRY_AFTER_SECS);
    }

    #[test]
    fn test_empty_content_is_an_error() {
        let resp: MessagesResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(matches!(
            AnthropicClient::extract_text(resp),
            Err(LlmError::EmptyResponse)
        ));
    }
}
