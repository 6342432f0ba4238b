//! CLI command implementations.
//!
//! Each command is one request/response pass: open the store, make at most
//! one change, render the result.

use crate::cli::output::{
    OutputFormat, format_card, format_card_list, format_created, format_deleted,
    format_initialized, format_manage_list, format_status,
};
use crate::cli::parser::{Cli, Commands};
use crate::cli::repl::run_study;
use crate::core::{NewFlashcard, StudySession};
use crate::error::{CommandError, IoError, Result, StorageError};
use crate::storage::{FlashcardStore, SqliteStorage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success. The interactive `study` command
/// writes to stdout itself and returns an empty string.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let db_path = cli.get_db_path();

    match &cli.command {
        Commands::Init { force } => cmd_init(&db_path, *force, format),
        Commands::Status => cmd_status(&db_path, format),
        Commands::Add { question, answer } => cmd_add(&db_path, question, answer, format),
        Commands::List => cmd_list(&db_path, format),
        Commands::Show { id } => cmd_show(&db_path, *id, format),
        Commands::Study { seed } => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            cmd_study(&db_path, *seed, stdin.lock(), &mut stdout, format)
        }
        Commands::Manage => cmd_manage(&db_path, format),
        Commands::Delete { id } => cmd_delete(&db_path, *id, format),
    }
}

/// Opens storage and makes sure the table exists.
fn open_storage(db_path: &Path) -> Result<SqliteStorage> {
    let mut storage = SqliteStorage::open(db_path)?;
    storage.init()?;
    Ok(storage)
}

// ==================== Command Implementations ====================

fn cmd_init(db_path: &Path, force: bool, format: OutputFormat) -> Result<String> {
    if db_path.exists() && !force {
        return Err(CommandError::ExecutionFailed(
            "Database already exists. Use --force to reinitialize.".to_string(),
        )
        .into());
    }

    if force && db_path.exists() {
        std::fs::remove_file(db_path).map_err(|e| {
            CommandError::ExecutionFailed(format!("Failed to remove existing database: {e}"))
        })?;
        info!(path = %db_path.display(), "removed existing database");
    }

    open_storage(db_path)?;
    Ok(format_initialized(db_path, format))
}

fn cmd_status(db_path: &Path, format: OutputFormat) -> Result<String> {
    if !db_path.exists() {
        return Err(StorageError::NotInitialized.into());
    }
    let storage = SqliteStorage::open(db_path)?;
    let stats = storage.stats()?;
    Ok(format_status(&stats, db_path, format))
}

fn cmd_add(db_path: &Path, question: &str, answer: &str, format: OutputFormat) -> Result<String> {
    let card = NewFlashcard::new(question, answer).inspect_err(|e| {
        warn!(error = %e, "rejected new card");
    })?;

    let mut storage = open_storage(db_path)?;
    let id = storage.create(&card)?;
    let created = storage
        .get(id)?
        .ok_or(StorageError::CardNotFound { id })?;

    Ok(format_created(&created, format))
}

fn cmd_list(db_path: &Path, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let cards = storage.list_all()?;
    Ok(format_card_list(&cards, format))
}

fn cmd_show(db_path: &Path, id: i64, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let card = storage
        .get(id)?
        .ok_or(StorageError::CardNotFound { id })?;
    Ok(format_card(&card, format))
}

fn cmd_study<I, O>(
    db_path: &Path,
    seed: Option<u64>,
    input: I,
    output: &mut O,
    format: OutputFormat,
) -> Result<String>
where
    I: io::BufRead,
    O: io::Write + ?Sized,
{
    let storage = open_storage(db_path)?;
    let mut session = StudySession::new();
    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    let summary = run_study(&storage, &mut session, &mut rng, input, output, format)?;
    info!(draws = summary.draws, reveals = summary.reveals, "study session finished");

    match format {
        OutputFormat::Text => Ok(String::new()),
        OutputFormat::Json => serde_json::to_string(&summary)
            .map(|s| format!("{s}\n"))
            .map_err(|e| IoError::WriteFailed(e.to_string()).into()),
    }
}

fn cmd_manage(db_path: &Path, format: OutputFormat) -> Result<String> {
    let storage = open_storage(db_path)?;
    let cards = storage.list_all()?;
    Ok(format_manage_list(&cards, format))
}

fn cmd_delete(db_path: &Path, id: i64, format: OutputFormat) -> Result<String> {
    let mut storage = open_storage(db_path)?;
    let removed = storage.delete(id)?;
    let remaining = storage.list_all()?;
    Ok(format_deleted(id, removed, &remaining, format))
}
