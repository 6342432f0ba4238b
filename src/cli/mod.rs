//! CLI layer for flashcards.
//!
//! Provides the command-line interface using clap: one subcommand per view
//! (create, list, study, manage) plus store housekeeping.

pub mod commands;
pub mod output;
pub mod parser;
pub mod repl;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
pub use repl::{StudyAction, StudySummary, StudyView};
