//! CLI layer.
//!
//! Provides the command-line interface using clap, with commands for
//! asking questions about a filing and listing known models.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
