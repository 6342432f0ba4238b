//! `SQLite` storage implementation.
//!
//! One connection is opened per process and held for the lifetime of the
//! [`SqliteStorage`] value; it is closed when the value is dropped.

// SQLite stores all integers as i64. Counts are never negative.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use crate::core::{Flashcard, NewFlashcard, now_timestamp};
use crate::error::{IoError, Result, StorageError};
use crate::storage::schema::{CHECK_SCHEMA_SQL, SCHEMA_SQL, SELECT_COLUMNS};
use crate::storage::traits::{FlashcardStore, StorageStats};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// How long a statement waits on a lock held by another process.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed flashcard store.
///
/// # Examples
///
/// ```no_run
/// use flashcards::core::NewFlashcard;
/// use flashcards::storage::{FlashcardStore, SqliteStorage};
///
/// let mut storage = SqliteStorage::open("flashcards.db").unwrap();
/// storage.init().unwrap();
/// let id = storage.create(&NewFlashcard::new("Q", "A").unwrap()).unwrap();
/// assert!(storage.get(id).unwrap().is_some());
/// ```
pub struct SqliteStorage {
    /// `SQLite` connection.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    path: Option<PathBuf>,
}

impl SqliteStorage {
    /// Opens or creates a `SQLite` database at the given path.
    ///
    /// Missing parent directories are created. The schema is not touched;
    /// call [`FlashcardStore::init`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
                path: parent.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        let conn = Connection::open(&path).map_err(StorageError::from)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(StorageError::from)?;

        // Use WAL mode so readers don't block the writer (returns result, use query_row)
        let _: String = conn
            .query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))
            .map_err(StorageError::from)?;

        debug!(path = %path.display(), "opened flashcard store");

        Ok(Self {
            conn,
            path: Some(path),
        })
    }

    /// Creates an in-memory `SQLite` database.
    ///
    /// Useful for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        Ok(Self { conn, path: None })
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn row_to_card(row: &Row<'_>) -> rusqlite::Result<Flashcard> {
        Ok(Flashcard {
            id: row.get(0)?,
            question: row.get(1)?,
            answer: row.get(2)?,
            created_at: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        })
    }
}

impl FlashcardStore for SqliteStorage {
    fn init(&mut self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA_SQL)
            .map_err(StorageError::from)?;
        Ok(())
    }

    fn is_initialized(&self) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row(CHECK_SCHEMA_SQL, [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count > 0)
    }

    fn create(&mut self, card: &NewFlashcard) -> Result<i64> {
        let created_at = now_timestamp();

        self.conn
            .execute(
                "INSERT INTO flashcards (question, answer, created_at) VALUES (?, ?, ?)",
                params![card.question(), card.answer(), created_at],
            )
            .map_err(StorageError::from)?;

        let id = self.conn.last_insert_rowid();
        info!(id, "created flashcard");
        Ok(id)
    }

    fn get(&self, id: i64) -> Result<Option<Flashcard>> {
        let card = self
            .conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM flashcards WHERE id = ?"),
                params![id],
                Self::row_to_card,
            )
            .optional()
            .map_err(StorageError::from)?;

        Ok(card)
    }

    fn list_all(&self) -> Result<Vec<Flashcard>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {SELECT_COLUMNS} FROM flashcards ORDER BY id"
            ))
            .map_err(StorageError::from)?;

        let cards = stmt
            .query_map([], Self::row_to_card)
            .map_err(StorageError::from)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StorageError::from)?;

        debug!(count = cards.len(), "listed flashcards");
        Ok(cards)
    }

    fn delete(&mut self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM flashcards WHERE id = ?", params![id])
            .map_err(StorageError::from)?;

        if removed > 0 {
            info!(id, "deleted flashcard");
        } else {
            debug!(id, "delete of missing flashcard ignored");
        }
        Ok(removed > 0)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM flashcards", [], |row| row.get(0))
            .map_err(StorageError::from)?;
        Ok(count as usize)
    }

    fn stats(&self) -> Result<StorageStats> {
        let db_size = self
            .path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok().map(|m| m.len()));

        if !self.is_initialized()? {
            return Ok(StorageStats {
                db_size,
                ..StorageStats::default()
            });
        }

        let (oldest, newest): (Option<String>, Option<String>) = self
            .conn
            .query_row(
                "SELECT MIN(created_at), MAX(created_at) FROM flashcards",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(StorageError::from)?;

        Ok(StorageStats {
            card_count: self.count()?,
            initialized: true,
            oldest,
            newest,
            db_size,
        })
    }
}
