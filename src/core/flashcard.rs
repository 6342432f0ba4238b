//! Flashcard domain model.
//!
//! A flashcard is an immutable question/answer pair. Once stored it is
//! never edited, only deleted.

use crate::error::ValidationError;
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Format of the `created_at` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A stored flashcard.
///
/// # Examples
///
/// ```
/// use flashcards::core::Flashcard;
///
/// let card = Flashcard {
///     id: 1,
///     question: "What is photosynthesis?".to_string(),
///     answer: "Turning light into chemical energy".to_string(),
///     created_at: "2024-01-01 12:00:00".to_string(),
/// };
/// assert_eq!(card.preview(12), "What is p...");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Store-assigned identifier, never reused.
    pub id: i64,

    /// Question or concept.
    pub question: String,

    /// Answer or definition.
    pub answer: String,

    /// Local time of insertion, `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
}

impl Flashcard {
    /// Returns the question shortened to `max_len` graphemes.
    ///
    /// Longer questions are cut and suffixed with `...`.
    #[must_use]
    pub fn preview(&self, max_len: usize) -> String {
        truncate_graphemes(&self.question, max_len)
    }

    /// Parses `created_at`, if it is in the expected format.
    #[must_use]
    pub fn created_at_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.created_at, TIMESTAMP_FORMAT).ok()
    }
}

/// Input for creating a flashcard.
///
/// Constructed through [`NewFlashcard::new`], which performs the presence
/// checks, so a value of this type is always insertable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlashcard {
    question: String,
    answer: String,
}

impl NewFlashcard {
    /// Validates and wraps a question/answer pair.
    ///
    /// Text is stored as typed; only blank input is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyQuestion`] or
    /// [`ValidationError::EmptyAnswer`] when a field is blank.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let question = question.into();
        let answer = answer.into();

        if question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        if answer.trim().is_empty() {
            return Err(ValidationError::EmptyAnswer);
        }

        Ok(Self { question, answer })
    }

    /// The question text.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The answer text.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Current local time formatted for the `created_at` column.
#[must_use]
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Truncates to `max_len` graphemes, using the last three for `...`.
pub(crate) fn truncate_graphemes(s: &str, max_len: usize) -> String {
    let graphemes: Vec<&str> = s.graphemes(true).collect();
    if graphemes.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        graphemes[..max_len].concat()
    } else {
        format!("{}...", graphemes[..max_len - 3].concat())
    }
}
