//! Core domain models for flashcards.
//!
//! The flashcard entity and the study session state machine. These are pure
//! domain types with no I/O dependencies.

pub mod flashcard;
pub mod study;

pub use flashcard::{Flashcard, NewFlashcard, TIMESTAMP_FORMAT, now_timestamp};
pub use study::{StudySession, StudyState};
