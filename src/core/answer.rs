//! Partial and final answer types.
//!
//! Each chunk produces exactly one [`PartialAnswer`]; the synthesizer
//! consumes them read-only and produces one [`FinalAnswer`]. Failures are
//! carried as tagged variants, never as error-shaped strings, so a caller
//! cannot mistake an error for a model answer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What answering one chunk produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkOutcome {
    /// The model returned text for this chunk (possibly a decline).
    Answered(String),
    /// The LLM call for this chunk failed; the batch continued without it.
    Failed(String),
}

/// The result of answering the question against one chunk alone.
///
/// Ordinals are 1-based and stable: partial answers are always ordered by
/// chunk position regardless of how the underlying calls completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialAnswer {
    /// 1-based position of the chunk within the filing.
    pub ordinal: usize,
    /// Total number of chunks in this query.
    pub total: usize,
    /// What the chunk's call produced.
    pub outcome: ChunkOutcome,
}

impl PartialAnswer {
    /// Creates a successful partial answer.
    #[must_use]
    pub fn answered(ordinal: usize, total: usize, text: String) -> Self {
        Self {
            ordinal,
            total,
            outcome: ChunkOutcome::Answered(text),
        }
    }

    /// Creates a synthetic partial answer recording a per-chunk failure.
    #[must_use]
    pub fn failed(ordinal: usize, total: usize, error: String) -> Self {
        Self {
            ordinal,
            total,
            outcome: ChunkOutcome::Failed(error),
        }
    }

    /// Whether this chunk's call failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.outcome, ChunkOutcome::Failed(_))
    }

    /// The answered text, if the call succeeded.
    #[must_use]
    pub fn answer_text(&self) -> Option<&str> {
        match &self.outcome {
            ChunkOutcome::Answered(text) => Some(text),
            ChunkOutcome::Failed(_) => None,
        }
    }

    /// Whether the answered text is empty or whitespace (failures count as
    /// blank: they contribute no answer content).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.answer_text().is_none_or(|t| t.trim().is_empty())
    }

    /// Renders this partial answer for concatenated output.
    ///
    /// Failures render with their ordinal and error description so a
    /// degraded final answer still tells the user which part is missing.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.outcome {
            ChunkOutcome::Answered(text) => text.clone(),
            ChunkOutcome::Failed(error) => format!(
                "[section {}/{} unavailable: {}]",
                self.ordinal, self.total, error
            ),
        }
    }
}

/// The single answer a query resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalAnswer {
    /// The filing fit in one chunk; its partial answer is returned verbatim.
    Single(String),
    /// Multiple chunks were merged by a synthesis call.
    Merged(String),
    /// Concatenated partial answers: synthesis was skipped (fewer than two
    /// usable answers) or failed (see `note`). Failed chunks appear as
    /// unavailable-section markers so their errors stay visible.
    Concatenated {
        /// The joined partial answers.
        text: String,
        /// Present when synthesis was attempted but failed.
        note: Option<String>,
    },
    /// Every partial answer declined or was empty; distinct from an empty
    /// string so callers can tell "no answer" from "blank answer".
    NoAnswer,
}

impl FinalAnswer {
    /// Short tag naming how this answer was produced.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Single(_) => "single",
            Self::Merged(_) => "merged",
            Self::Concatenated { .. } => "concatenated",
            Self::NoAnswer => "no_answer",
        }
    }
}

impl fmt::Display for FinalAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(text) | Self::Merged(text) => f.write_str(text),
            Self::Concatenated { text, note } => {
                f.write_str(text)?;
                if let Some(note) = note {
                    write!(f, "\n\n[note: {note}]")?;
                }
                Ok(())
            }
            Self::NoAnswer => f.write_str(
                "No answer could be generated: no section of the filing \
                 contained enough information to address the question.",
            ),
        }
    }
}
