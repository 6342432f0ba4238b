//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::cli::repl::StudyView;
use crate::core::Flashcard;
use crate::error::Error;
use crate::storage::StorageStats;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Question preview length in the list view.
pub const LIST_PREVIEW_LEN: usize = 50;

/// Question preview length in the manage view.
pub const MANAGE_PREVIEW_LEN: usize = 80;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a status response.
#[must_use]
pub fn format_status(stats: &StorageStats, db_path: &Path, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str("Flashcards Status\n");
            output.push_str("=================\n\n");
            let _ = writeln!(output, "  Database:      {}", db_path.display());
            let _ = writeln!(output, "  Cards:         {}", stats.card_count);
            if let (Some(oldest), Some(newest)) = (&stats.oldest, &stats.newest) {
                let _ = writeln!(output, "  Oldest:        {oldest}");
                let _ = writeln!(output, "  Newest:        {newest}");
            }
            if let Some(size) = stats.db_size {
                let _ = writeln!(output, "  DB size:       {size} bytes");
            }
            output
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Status<'a> {
                database: String,
                #[serde(flatten)]
                stats: &'a StorageStats,
            }
            format_json(&Status {
                database: db_path.display().to_string(),
                stats,
            })
        }
    }
}

/// Formats the full card list: question, answer and creation time.
#[must_use]
pub fn format_card_list(cards: &[Flashcard], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_card_list_text(cards),
        OutputFormat::Json => format_json(&cards),
    }
}

fn format_card_list_text(cards: &[Flashcard]) -> String {
    if cards.is_empty() {
        return "No cards yet. Create your first one with: flashcards add <QUESTION> <ANSWER>\n"
            .to_string();
    }

    let mut output = String::new();
    let _ = writeln!(output, "Total cards: {}", cards.len());

    for card in cards {
        output.push('\n');
        let _ = writeln!(output, "[{}] {}", card.id, card.preview(LIST_PREVIEW_LEN));
        write_card_body(&mut output, card);
    }

    output
}

fn write_card_body(output: &mut String, card: &Flashcard) {
    let _ = writeln!(output, "    Question: {}", card.question);
    let _ = writeln!(output, "    Answer:   {}", card.answer);
    let _ = writeln!(output, "    Created:  {}", card.created_at);
}

/// Formats a single card.
#[must_use]
pub fn format_card(card: &Flashcard, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Card {}", card.id);
            write_card_body(&mut output, card);
            output
        }
        OutputFormat::Json => format_json(card),
    }
}

/// Formats the outcome of `init`.
#[must_use]
pub fn format_initialized(db_path: &Path, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            format!("Initialized flashcards database at: {}\n", db_path.display())
        }
        OutputFormat::Json => format_json(&serde_json::json!({
            "initialized": true,
            "database": db_path.display().to_string(),
        })),
    }
}

/// Formats the outcome of a create.
#[must_use]
pub fn format_created(card: &Flashcard, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("Saved card {}.\n", card.id),
        OutputFormat::Json => format_json(card),
    }
}

/// Formats the manage view: one row per card with its ID.
#[must_use]
pub fn format_manage_list(cards: &[Flashcard], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_manage_list_text(cards),
        OutputFormat::Json => format_json(&manage_rows(cards)),
    }
}

/// One row of the manage view in JSON output.
#[derive(Serialize)]
struct ManageRow {
    id: i64,
    question: String,
}

fn manage_rows(cards: &[Flashcard]) -> Vec<ManageRow> {
    cards
        .iter()
        .map(|card| ManageRow {
            id: card.id,
            question: card.preview(MANAGE_PREVIEW_LEN),
        })
        .collect()
}

fn format_manage_list_text(cards: &[Flashcard]) -> String {
    if cards.is_empty() {
        return "No cards to manage.\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(output, "{:<6} Question", "ID");
    output.push_str(&"-".repeat(70));
    output.push('\n');

    for card in cards {
        let _ = writeln!(output, "{:<6} {}", card.id, card.preview(MANAGE_PREVIEW_LEN));
    }

    output.push_str("\nDelete a card with: flashcards delete <ID>\n");
    output
}

/// Formats the outcome of a delete followed by the refreshed manage view.
#[must_use]
pub fn format_deleted(
    id: i64,
    removed: bool,
    remaining: &[Flashcard],
    format: OutputFormat,
) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = if removed {
                format!("Deleted card {id}.\n\n")
            } else {
                format!("No card with ID {id}; nothing deleted.\n\n")
            };
            output.push_str(&format_manage_list_text(remaining));
            output
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "id": id,
                "deleted": removed,
                "remaining": manage_rows(remaining),
            });
            format_json(&json)
        }
    }
}

/// Formats one study session response.
///
/// JSON responses are single-line so a session reads as one object per line.
#[must_use]
pub fn format_study_view(view: &StudyView, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            if let Some(notice) = &view.notice {
                let _ = writeln!(output, "{notice}");
            }
            if let Some(question) = &view.question {
                let _ = writeln!(output, "\n  {question}\n");
                match &view.answer {
                    Some(answer) => {
                        let _ = writeln!(output, "  Answer: {answer}");
                    }
                    None => output.push_str("  (r to reveal the answer, d for another card)\n"),
                }
            }
            output
        }
        OutputFormat::Json => {
            let mut line = serde_json::to_string(view).unwrap_or_else(|_| "{}".to_string());
            line.push('\n');
            line
        }
    }
}

/// Formats an error for display.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => err.to_string(),
        OutputFormat::Json => format_json(&serde_json::json!({ "error": err.to_string() })),
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
