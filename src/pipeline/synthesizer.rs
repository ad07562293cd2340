//! Reduction of partial answers to a final answer.

use tracing::{debug, info, warn};

use crate::core::{ChunkOutcome, FinalAnswer, PartialAnswer, QueryRequest};
use crate::llm::LlmService;
use crate::pipeline::prompt;

/// Reduces partial answers to one [`FinalAnswer`].
///
/// A partial is *usable* when its call succeeded, its text is non-blank,
/// and it does not decline. The reduction is:
///
/// - one chunk total: its answer verbatim (declines included); a blank
///   answer is [`FinalAnswer::NoAnswer`], a failed call surfaces its
///   unavailable-section marker;
/// - no usable partials: [`FinalAnswer::NoAnswer`] when every chunk
///   declined or was blank — but if any call failed, the failure markers
///   are concatenated instead, so error detail is never presented as a
///   content-based "no answer";
/// - one usable partial: concatenated with any failure markers, no
///   synthesis call;
/// - two or more: a single synthesis call merges them. If that call fails,
///   the usable partials and failure markers are concatenated and the
///   failure noted, so work already paid for is never discarded.
pub async fn synthesize(
    llm: &dyn LlmService,
    request: &QueryRequest,
    partials: &[PartialAnswer],
    max_tokens: u32,
) -> FinalAnswer {
    if let [only] = partials {
        return match &only.outcome {
            ChunkOutcome::Answered(text) if !only.is_blank() => {
                FinalAnswer::Single(text.clone())
            }
            ChunkOutcome::Answered(_) => FinalAnswer::NoAnswer,
            ChunkOutcome::Failed(_) => FinalAnswer::Concatenated {
                text: only.render(),
                note: None,
            },
        };
    }

    let is_usable = |p: &PartialAnswer| {
        !p.is_blank() && p.answer_text().is_some_and(|t| !prompt::contains_decline_signal(t))
    };
    let usable: Vec<&PartialAnswer> = partials.iter().filter(|p| is_usable(p)).collect();
    // What the user sees when there is no merged answer: usable content in
    // chunk order, failure markers included, declines and blanks dropped.
    let shown: Vec<&PartialAnswer> = partials
        .iter()
        .filter(|p| p.is_failed() || is_usable(p))
        .collect();

    debug!(
        total = partials.len(),
        usable = usable.len(),
        "reducing partial answers"
    );

    match usable.as_slice() {
        [] if shown.is_empty() => FinalAnswer::NoAnswer,
        [] | [_] => FinalAnswer::Concatenated {
            text: concat_rendered(&shown),
            note: None,
        },
        many => {
            let synthesis_prompt = prompt::build_synthesis_prompt(
                &request.ticker,
                request.year,
                &request.question,
                many,
            );
            match llm
                .generate(&request.model, &synthesis_prompt, max_tokens)
                .await
            {
                Ok(text) => {
                    info!(parts = many.len(), "synthesized final answer");
                    FinalAnswer::Merged(text)
                }
                Err(e) => {
                    warn!(error = %e, "synthesis failed, concatenating partial answers");
                    FinalAnswer::Concatenated {
                        text: concat_rendered(&shown),
                        note: Some(format!("synthesis failed: {e}")),
                    }
                }
            }
        }
    }
}

fn concat_rendered(parts: &[&PartialAnswer]) -> String {
    parts
        .iter()
        .map(|p| p.render())
        .collect::<Vec<_>>()
        .join(prompt::PARTIAL_SEPARATOR)
}
