//! Storage trait definition.
//!
//! Defines the interface the CLI layer talks to, so the SQLite backend can
//! be swapped for an in-memory one in tests.

use crate::core::{Flashcard, NewFlashcard};
use crate::error::Result;
use serde::Serialize;

/// Trait for flashcard storage backends.
///
/// Every operation is a single atomic statement; there are no multi-row
/// transactions and no partial success.
pub trait FlashcardStore {
    /// Ensures the flashcards table exists.
    ///
    /// Idempotent - safe to call on every start.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    fn init(&mut self) -> Result<()>;

    /// Checks if the flashcards table exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the check cannot be performed.
    fn is_initialized(&self) -> Result<bool>;

    /// Inserts a card stamped with the current time.
    ///
    /// Returns the assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn create(&mut self, card: &NewFlashcard) -> Result<i64>;

    /// Retrieves a card by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get(&self, id: i64) -> Result<Option<Flashcard>>;

    /// Lists every card in ascending ID order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn list_all(&self) -> Result<Vec<Flashcard>>;

    /// Deletes a card by ID.
    ///
    /// Returns whether a row was removed. A missing ID is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn delete(&mut self, id: i64) -> Result<bool>;

    /// Returns the number of stored cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails.
    fn count(&self) -> Result<usize>;

    /// Gets storage statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if statistics cannot be gathered.
    fn stats(&self) -> Result<StorageStats>;
}

/// Storage statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
    /// Number of cards stored.
    pub card_count: usize,
    /// Whether the flashcards table exists.
    pub initialized: bool,
    /// Creation time of the oldest card.
    pub oldest: Option<String>,
    /// Creation time of the newest card.
    pub newest: Option<String>,
    /// Database file size in bytes (if applicable).
    pub db_size: Option<u64>,
}
