//! # flashcards
//!
//! Single-user flashcard manager backed by `SQLite`.
//!
//! Cards are question/answer pairs that are created, listed, studied in a
//! random order, and deleted. They are never edited.
//!
//! ## Features
//!
//! - **`SQLite` Storage**: one long-lived connection, one table
//! - **Study Mode**: random draws with an explicit per-session reveal state
//! - **Text and JSON Output**: every command renders both ways

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod logging;
pub mod storage;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Flashcard, NewFlashcard, StudySession, StudyState};

// Re-export storage types
pub use storage::{DEFAULT_DB_PATH, FlashcardStore, SqliteStorage, StorageStats};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
