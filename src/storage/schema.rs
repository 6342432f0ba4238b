//! Database schema definitions.
//!
//! The store is a single table. `AUTOINCREMENT` keeps SQLite from handing
//! out the id of a deleted row again.

/// SQL schema for the flashcards table.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS flashcards (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL,
    answer TEXT NOT NULL,
    created_at TEXT
);
";

/// SQL to check if schema is initialized.
pub const CHECK_SCHEMA_SQL: &str = r"
SELECT COUNT(*) FROM sqlite_master
WHERE type='table' AND name='flashcards';
";

/// Column list shared by every card query.
pub const SELECT_COLUMNS: &str = "id, question, answer, created_at";
