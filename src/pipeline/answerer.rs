//! Per-chunk answering stage.

use tracing::{debug, warn};

use crate::core::{PartialAnswer, QueryRequest};
use crate::llm::LlmService;
use crate::pipeline::prompt;

/// Answers the question against each chunk, in chunk order.
///
/// Calls are sequential: one in flight at a time, partial answers in the
/// same order as the chunks. A failed call does not abort the batch; it
/// becomes a [`PartialAnswer`] tagged with the failure, and later chunks
/// are still processed.
pub async fn answer_chunks(
    llm: &dyn LlmService,
    request: &QueryRequest,
    chunks: &[String],
    max_tokens: u32,
) -> Vec<PartialAnswer> {
    let total = chunks.len();
    let mut partials = Vec::with_capacity(total);

    for (i, chunk) in chunks.iter().enumerate() {
        let ordinal = i + 1;
        let prompt = prompt::build_chunk_prompt(
            &request.ticker,
            request.year,
            &request.question,
            chunk,
            ordinal,
            total,
        );

        match llm.generate(&request.model, &prompt, max_tokens).await {
            Ok(text) => {
                debug!(ordinal, total, chars = text.len(), "chunk answered");
                partials.push(PartialAnswer::answered(ordinal, total, text));
            }
            Err(e) => {
                warn!(ordinal, total, error = %e, "chunk call failed, continuing");
                partials.push(PartialAnswer::failed(ordinal, total, e.to_string()));
            }
        }
    }

    partials
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::LlmError;

    struct ScriptedLlm {
        responses: Mutex<Vec<std::result::Result<String, LlmError>>>,
    }

    impl ScriptedLlm {
        fn new(responses: Vec<std::result::Result<String, LlmError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl LlmService for ScriptedLlm {
        async fn generate(
            &self,
            _model: &str,
            _prompt: &str,
            _max_tokens: u32,
        ) -> std::result::Result<String, LlmError> {
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn request() -> QueryRequest {
        QueryRequest::new("AAPL", 2023, "What are the risks?", "claude-3-5-sonnet-20241022")
    }

    #[tokio::test]
    async fn test_one_partial_per_chunk_in_order() {
        let llm = ScriptedLlm::new(vec![
            Ok("first".to_string()),
            Ok("second".to_string()),
            Ok("third".to_string()),
        ]);
        let chunks = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let partials = answer_chunks(&llm, &request(), &chunks, 256).await;

        assert_eq!(partials.len(), 3);
        for (i, partial) in partials.iter().enumerate() {
            assert_eq!(partial.ordinal, i + 1);
            assert_eq!(partial.total, 3);
            assert!(!partial.is_failed());
        }
        assert_eq!(partials[1].answer_text(), Some("second"));
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_the_batch() {
        let llm = ScriptedLlm::new(vec![
            Ok("first".to_string()),
            Err(LlmError::RateLimited {
                retry_after_secs: 5,
            }),
            Ok("third".to_string()),
        ]);
        let chunks = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let partials = answer_chunks(&llm, &request(), &chunks, 256).await;

        assert_eq!(partials.len(), 3);
        assert!(!partials[0].is_failed());
        assert!(partials[1].is_failed());
        assert!(!partials[2].is_failed());
        // The failed partial still knows where it sits.
        assert_eq!(partials[1].ordinal, 2);
        assert!(partials[1].render().contains("2/3"));
    }

    #[tokio::test]
    async fn test_no_chunks_yields_no_partials() {
        let llm = ScriptedLlm::new(vec![]);
        let partials = answer_chunks(&llm, &request(), &[], 256).await;
        assert!(partials.is_empty());
    }
}
