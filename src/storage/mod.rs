//! Storage layer for flashcards.
//!
//! Persists cards in a single `SQLite` table behind the [`FlashcardStore`]
//! trait.

pub mod schema;
pub mod sqlite;
pub mod traits;

pub use schema::SCHEMA_SQL;
pub use sqlite::SqliteStorage;
pub use traits::{FlashcardStore, StorageStats};

/// Default database path, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "flashcards.db";
