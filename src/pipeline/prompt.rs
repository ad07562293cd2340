//! Prompt builders for the per-chunk and synthesis calls.
//!
//! The decline phrase the chunk prompt instructs the model to use and the
//! predicate that detects it live side by side here, so the wording cannot
//! drift apart.

use std::fmt::Write;

use crate::core::PartialAnswer;

/// The exact phrase a chunk answer uses when its excerpt is insufficient.
pub const DECLINE_SIGNAL: &str = "cannot answer";

/// Separator between rendered partial answers in concatenated output.
pub const PARTIAL_SEPARATOR: &str = "\n\n---\n\n";

/// Whether a chunk answer declined to answer.
///
/// Case-insensitive substring match, so "I CANNOT ANSWER this question"
/// and "Unfortunately I cannot answer..." both count.
#[must_use]
pub fn contains_decline_signal(text: &str) -> bool {
    text.to_lowercase().contains(DECLINE_SIGNAL)
}

/// Builds the user message for answering the question against one chunk.
#[must_use]
pub fn build_chunk_prompt(
    ticker: &str,
    year: u16,
    question: &str,
    chunk: &str,
    ordinal: usize,
    total: usize,
) -> String {
    format!(
        "You are analyzing an excerpt of the 10-K filing for {ticker} \
         (fiscal year {year}). This is part {ordinal} of {total}.\n\n\
         Based only on the following excerpt, answer this question:\n\
         {question}\n\n\
         Provide a detailed, specific answer using only information in the \
         excerpt. If the excerpt does not contain the information needed, \
         reply with exactly: {DECLINE_SIGNAL}\n\n\
         10-K EXCERPT:\n{chunk}"
    )
}

/// Builds the user message for merging partial answers into one.
///
/// Only the given partials are included; the caller decides which ones
/// carry usable content.
#[must_use]
pub fn build_synthesis_prompt(
    ticker: &str,
    year: u16,
    question: &str,
    partials: &[&PartialAnswer],
) -> String {
    let mut prompt = format!(
        "Several excerpts of the 10-K filing for {ticker} (fiscal year \
         {year}) were analyzed independently to answer this question:\n\
         {question}\n\n\
         Combine the partial answers below into one coherent answer. \
         Resolve overlaps, keep specific figures, and do not introduce \
         information absent from the partial answers.\n\n\
         PARTIAL ANSWERS:\n"
    );

    for partial in partials {
        let _ = write!(
            prompt,
            "\n### Part {} of {}\n{}\n",
            partial.ordinal,
            partial.total,
            partial.render()
        );
    }

    prompt
}
