//! Error types for flashcard operations.
//!
//! A `thiserror` hierarchy covering input validation, storage, the study
//! session state machine, terminal I/O, and CLI commands.

use thiserror::Error;

/// Result type alias for flashcard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected user input (no state change happened).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store could not be opened, read, or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Study session transition not allowed in the current state.
    #[error("study error: {0}")]
    Study(#[from] StudyError),

    /// Terminal I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Presence checks on card input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Question is empty or whitespace only.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// Answer is empty or whitespace only.
    #[error("answer must not be empty")]
    EmptyAnswer,
}

/// Storage-specific errors for database operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// The flashcards table does not exist yet.
    #[error("flashcard store not initialized. Run: flashcards init")]
    NotInitialized,

    /// No card with this ID.
    #[error("card not found: {id}")]
    CardNotFound {
        /// Card ID that was not found.
        id: i64,
    },
}

/// Study mode transition errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StudyError {
    /// Draw was requested but the store holds no cards.
    #[error("no cards to study. Add some first")]
    EmptyDeck,

    /// Reveal was requested before any card was drawn.
    #[error("no card selected. Draw a card first")]
    NoCardSelected,
}

/// I/O-specific errors.
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to read user input.
    #[error("failed to read input: {0}")]
    ReadFailed(String),

    /// Failed to write output.
    #[error("failed to write output: {0}")]
    WriteFailed(String),

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
