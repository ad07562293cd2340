//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use std::sync::Arc;

use crate::cli::output::{OutputFormat, format_models, format_report};
use crate::cli::parser::{Cli, Commands};
use crate::core::QueryRequest;
use crate::error::{Result, ValidationError};
use crate::filing::EdgarClient;
use crate::llm::AnthropicClient;
use crate::pipeline::{Analyzer, AnalyzerOptions};

/// Known Anthropic models and a short note about each.
const KNOWN_MODELS: &[(&str, &str)] = &[
    ("claude-3-5-sonnet-20241022", "recommended, best balance"),
    ("claude-3-5-haiku-20241022", "faster, cheaper"),
    ("claude-3-opus-20240229", "most capable"),
];

/// Executes the CLI command.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub async fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Ask {
            ticker,
            year,
            question,
            model,
            api_key,
            identity,
            chunk_tokens,
            answer_tokens,
            synthesis_tokens,
            show_partials,
        } => {
            cmd_ask(AskArgs {
                ticker,
                year: *year,
                question,
                model,
                api_key: api_key.as_deref(),
                identity: identity.as_deref(),
                chunk_tokens: *chunk_tokens,
                answer_tokens: *answer_tokens,
                synthesis_tokens: *synthesis_tokens,
                show_partials: *show_partials,
                format,
            })
            .await
        }
        Commands::Models => Ok(format_models(KNOWN_MODELS, format)),
    }
}

struct AskArgs<'a> {
    ticker: &'a str,
    year: u16,
    question: &'a str,
    model: &'a str,
    api_key: Option<&'a str>,
    identity: Option<&'a str>,
    chunk_tokens: usize,
    answer_tokens: u32,
    synthesis_tokens: u32,
    show_partials: bool,
    format: OutputFormat,
}

async fn cmd_ask(args: AskArgs<'_>) -> Result<String> {
    let api_key = args
        .api_key
        .filter(|k| !k.trim().is_empty())
        .ok_or(ValidationError::MissingApiKey)?;
    let identity = args
        .identity
        .filter(|i| !i.trim().is_empty())
        .ok_or(ValidationError::MissingIdentity)?;

    let request = QueryRequest::new(args.ticker, args.year, args.question, args.model);
    request.validate()?;

    let filings = Arc::new(EdgarClient::new(identity)?);
    let llm = Arc::new(AnthropicClient::new(api_key)?);
    let analyzer = Analyzer::new(
        filings,
        llm,
        AnalyzerOptions {
            max_chunk_tokens: args.chunk_tokens,
            answer_budget_tokens: args.answer_tokens,
            synthesis_budget_tokens: args.synthesis_tokens,
        },
    );

    let report = analyzer.run(request).await?;
    Ok(format_report(&report, args.show_partials, args.format))
}
