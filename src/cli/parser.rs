//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flashcards: create, review, and manage question/answer cards.
#[derive(Parser, Debug)]
#[command(name = "flashcards")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the flashcards database file.
    ///
    /// Defaults to `flashcards.db` in the current directory.
    #[arg(short, long, env = "FLASHCARDS_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the flashcards database.
    ///
    /// Every other command creates the table on demand; this one reports
    /// where the database lives and can start over with `--force`.
    Init {
        /// Delete the existing database first (destroys all cards).
        #[arg(short, long)]
        force: bool,
    },

    /// Show store status.
    Status,

    /// Create a new card.
    #[command(alias = "create")]
    Add {
        /// Question or concept.
        question: String,

        /// Answer or definition.
        answer: String,
    },

    /// List all cards with their answers.
    #[command(alias = "ls")]
    List,

    /// Show a single card.
    Show {
        /// Card ID.
        id: i64,
    },

    /// Study cards in random order (interactive).
    ///
    /// Reads commands from stdin: `d`/`draw` (or an empty line) draws a
    /// card, `r`/`reveal` shows its answer, `q`/`quit` ends the session.
    Study {
        /// Seed for the random card picker (reproducible sessions).
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List cards with their IDs for deletion.
    Manage,

    /// Delete a card and show the remaining ones.
    #[command(alias = "rm")]
    Delete {
        /// Card ID.
        id: i64,
    },
}

impl Cli {
    /// Returns the database path, using the default if not specified.
    #[must_use]
    pub fn get_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(crate::storage::DEFAULT_DB_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_db_path() {
        let cli = Cli {
            db_path: None,
            verbose: false,
            format: "text".to_string(),
            command: Commands::List,
        };
        assert_eq!(
            cli.get_db_path(),
            PathBuf::from(crate::storage::DEFAULT_DB_PATH)
        );
    }

    #[test]
    fn test_custom_db_path() {
        let cli = Cli::try_parse_from(["flashcards", "--db-path", "/custom/cards.db", "status"])
            .unwrap();
        assert_eq!(cli.get_db_path(), PathBuf::from("/custom/cards.db"));
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["flashcards", "add", "What is 2+2?", "4"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Add { ref question, ref answer }
                if question == "What is 2+2?" && answer == "4"
        ));
    }

    #[test]
    fn test_parse_aliases() {
        let cli = Cli::try_parse_from(["flashcards", "rm", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { id: 3 }));

        let cli = Cli::try_parse_from(["flashcards", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::List));

        let cli = Cli::try_parse_from(["flashcards", "create", "Q", "A"]).unwrap();
        assert!(matches!(cli.command, Commands::Add { .. }));
    }

    #[test]
    fn test_parse_study_seed() {
        let cli = Cli::try_parse_from(["flashcards", "study", "--seed", "11"]).unwrap();
        assert!(matches!(cli.command, Commands::Study { seed: Some(11) }));
    }

    #[test]
    fn test_parse_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["flashcards", "delete", "abc"]).is_err());
    }
}
