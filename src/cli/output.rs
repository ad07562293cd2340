//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use std::fmt::Write;

use serde::Serialize;

use crate::core::ChunkOutcome;
use crate::error::Error;
use crate::pipeline::analyzer::AnalysisReport;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats an analysis report.
#[must_use]
pub fn format_report(report: &AnalysisReport, show_partials: bool, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_report_text(report, show_partials),
        OutputFormat::Json => format_json(report),
    }
}

fn format_report_text(report: &AnalysisReport, show_partials: bool) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{} 10-K (fiscal year {}), {} chunk{}",
        report.request.ticker,
        report.request.year,
        report.chunk_count,
        if report.chunk_count == 1 { "" } else { "s" }
    );
    let _ = writeln!(output, "Question: {}", report.request.question);
    output.push('\n');

    if show_partials {
        for partial in &report.partials {
            let _ = writeln!(output, "--- Part {} of {} ---", partial.ordinal, partial.total);
            match &partial.outcome {
                ChunkOutcome::Answered(text) => {
                    let _ = writeln!(output, "{text}");
                }
                ChunkOutcome::Failed(error) => {
                    let _ = writeln!(output, "(failed: {error})");
                }
            }
            output.push('\n');
        }
        output.push_str("=== Final answer ===\n");
    }

    let _ = writeln!(output, "{}", report.answer);
    output
}

/// Formats the known-models listing.
#[must_use]
pub fn format_models(models: &[(&str, &str)], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str("Available Anthropic models:\n");
            for (model, note) in models {
                let _ = writeln!(output, "  {model:<32} {note}");
            }
            output
        }
        OutputFormat::Json => {
            let entries: Vec<_> = models
                .iter()
                .map(|(model, note)| {
                    serde_json::json!({ "model": model, "note": note })
                })
                .collect();
            format_json(&entries)
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => format_json(&serde_json::json!({ "error": error.to_string() })),
    }
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
