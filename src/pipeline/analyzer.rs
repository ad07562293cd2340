//! Pipeline orchestration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::chunking::{DEFAULT_MAX_CHUNK_TOKENS, TokenChunker};
use crate::core::{FinalAnswer, PartialAnswer, QueryRequest};
use crate::error::Error;
use crate::filing::FilingSource;
use crate::llm::LlmService;
use crate::pipeline::{
    DEFAULT_ANSWER_BUDGET_TOKENS, DEFAULT_SYNTHESIS_BUDGET_TOKENS, answerer, synthesizer,
};

/// Tuning knobs for a single analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerOptions {
    /// Maximum tokens per chunk.
    pub max_chunk_tokens: usize,
    /// Completion budget for each per-chunk answer.
    pub answer_budget_tokens: u32,
    /// Completion budget for the synthesis call.
    pub synthesis_budget_tokens: u32,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_chunk_tokens: DEFAULT_MAX_CHUNK_TOKENS,
            answer_budget_tokens: DEFAULT_ANSWER_BUDGET_TOKENS,
            synthesis_budget_tokens: DEFAULT_SYNTHESIS_BUDGET_TOKENS,
        }
    }
}

/// Everything a run produced, for rendering or serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The validated request this report answers.
    pub request: QueryRequest,
    /// Number of chunks the filing was split into.
    pub chunk_count: usize,
    /// Per-chunk partial answers, in chunk order.
    pub partials: Vec<PartialAnswer>,
    /// The reduced final answer.
    pub answer: FinalAnswer,
}

/// Runs queries end to end: fetch, chunk, answer, synthesize.
pub struct Analyzer {
    filings: Arc<dyn FilingSource>,
    llm: Arc<dyn LlmService>,
    options: AnalyzerOptions,
}

impl Analyzer {
    /// Creates an analyzer over the given sources.
    #[must_use]
    pub fn new(
        filings: Arc<dyn FilingSource>,
        llm: Arc<dyn LlmService>,
        options: AnalyzerOptions,
    ) -> Self {
        Self {
            filings,
            llm,
            options,
        }
    }

    /// Answers `request` against the company's 10-K.
    ///
    /// Validation and fetch problems are fatal. Per-chunk LLM failures are
    /// not: they surface as failed partials in the report and as
    /// unavailable-section markers in the answer. Only a run where every
    /// chunk declined or came back blank ends in [`FinalAnswer::NoAnswer`].
    pub async fn run(&self, request: QueryRequest) -> crate::Result<AnalysisReport> {
        request.validate()?;

        info!(
            ticker = %request.ticker,
            year = request.year,
            model = %request.model,
            "fetching 10-K"
        );
        let text = self.filings.fetch(&request.ticker, request.year).await?;
        if text.trim().is_empty() {
            return Err(Error::EmptyDocument {
                ticker: request.ticker.clone(),
                year: request.year,
            });
        }

        let chunker = TokenChunker::for_model(&request.model)?;
        let chunks = chunker.chunk(&text, self.options.max_chunk_tokens)?;
        if chunks.is_empty() {
            return Err(Error::EmptyDocument {
                ticker: request.ticker.clone(),
                year: request.year,
            });
        }
        info!(
            chunks = chunks.len(),
            max_chunk_tokens = self.options.max_chunk_tokens,
            "partitioned filing"
        );

        let partials = answerer::answer_chunks(
            self.llm.as_ref(),
            &request,
            &chunks,
            self.options.answer_budget_tokens,
        )
        .await;

        let answer = synthesizer::synthesize(
            self.llm.as_ref(),
            &request,
            &partials,
            self.options.synthesis_budget_tokens,
        )
        .await;

        info!(kind = answer.kind(), "analysis complete");

        Ok(AnalysisReport {
            request,
            chunk_count: chunks.len(),
            partials,
            answer,
        })
    }
}
