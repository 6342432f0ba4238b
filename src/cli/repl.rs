//! Interactive study session.
//!
//! Each line read from the input is one request: it is parsed into a
//! [`StudyAction`], applied to the caller's [`StudySession`], and answered
//! with a rendered [`StudyView`]. The deck is re-read from the store on
//! every draw so cards added or deleted elsewhere are picked up.

use crate::cli::output::{OutputFormat, format_study_view};
use crate::core::{StudySession, StudyState};
use crate::error::{Error, IoError, Result, StudyError};
use crate::storage::FlashcardStore;
use rand::Rng;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const HELP_TEXT: &str =
    "Commands: d/draw (or Enter) = random card, r/reveal = show answer, q/quit = end session";

const EMPTY_DECK_NOTICE: &str = "No cards to study. Add some first.";

/// A parsed line of study input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyAction {
    /// Pick a random card.
    Draw,
    /// Show the current card's answer.
    Reveal,
    /// Print the command summary.
    Help,
    /// End the session.
    Quit,
    /// Anything else.
    Unknown(String),
}

impl StudyAction {
    /// Parses one input line (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "" | "d" | "draw" | "n" | "next" => Self::Draw,
            "r" | "reveal" | "a" | "answer" => Self::Reveal,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

/// What the user sees after one study request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyView {
    /// Session state after the request.
    pub state: StudyState,
    /// ID of the card under review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Question of the card under review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Answer, present only once revealed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Message for the user (errors, help, empty deck).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl StudyView {
    /// Snapshot of a session.
    #[must_use]
    pub fn from_session(session: &StudySession) -> Self {
        let card = session.current();
        Self {
            state: session.state(),
            id: card.map(|c| c.id),
            question: card.map(|c| c.question.clone()),
            answer: session.visible_answer().map(str::to_string),
            notice: None,
        }
    }

    /// Attaches a message.
    #[must_use]
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StudySummary {
    /// Successful draws.
    pub draws: usize,
    /// Successful reveals.
    pub reveals: usize,
}

/// Applies one action to the session.
///
/// `Quit` is handled by the caller and leaves the session unchanged here.
///
/// # Errors
///
/// Returns a study error for disallowed transitions (empty deck, reveal
/// before draw) and a storage error if the deck cannot be read.
pub fn handle_action<S, G>(
    store: &S,
    session: &mut StudySession,
    rng: &mut G,
    action: &StudyAction,
) -> Result<StudyView>
where
    S: FlashcardStore + ?Sized,
    G: Rng + ?Sized,
{
    match action {
        StudyAction::Draw => {
            let cards = store.list_all()?;
            let drawn = session.draw(&cards, rng)?;
            debug!(id = drawn.id, deck = cards.len(), "drew card");
            Ok(StudyView::from_session(session))
        }
        StudyAction::Reveal => {
            session.reveal()?;
            Ok(StudyView::from_session(session))
        }
        StudyAction::Help => Ok(StudyView::from_session(session).with_notice(HELP_TEXT)),
        StudyAction::Quit => Ok(StudyView::from_session(session)),
        StudyAction::Unknown(input) => Ok(StudyView::from_session(session)
            .with_notice(format!("Unknown input '{input}'. {HELP_TEXT}"))),
    }
}

/// Runs a study session until `quit` or end of input.
///
/// Errors from a single request are shown to the user and the session
/// continues; only failing to read input or write output ends it early.
///
/// # Errors
///
/// Returns an I/O error if the input cannot be read or the output written.
pub fn run_study<S, G, I, O>(
    store: &S,
    session: &mut StudySession,
    rng: &mut G,
    mut input: I,
    output: &mut O,
    format: OutputFormat,
) -> Result<StudySummary>
where
    S: FlashcardStore + ?Sized,
    G: Rng + ?Sized,
    I: BufRead,
    O: Write + ?Sized,
{
    let mut summary = StudySummary::default();

    let intro = match store.count() {
        Ok(0) => StudyView::from_session(session).with_notice(EMPTY_DECK_NOTICE),
        Ok(count) => {
            StudyView::from_session(session).with_notice(format!("{count} cards. {HELP_TEXT}"))
        }
        Err(e) => StudyView::from_session(session).with_notice(e.to_string()),
    };
    emit(output, &format_study_view(&intro, format))?;

    let mut line = String::new();
    loop {
        if format == OutputFormat::Text {
            emit(output, "> ")?;
        }

        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|e| IoError::ReadFailed(e.to_string()))?;
        if read == 0 {
            break;
        }

        let action = StudyAction::parse(&line);
        if action == StudyAction::Quit {
            break;
        }

        let view = match handle_action(store, session, rng, &action) {
            Ok(view) => {
                match action {
                    StudyAction::Draw => summary.draws += 1,
                    StudyAction::Reveal => summary.reveals += 1,
                    _ => {}
                }
                view
            }
            Err(Error::Study(StudyError::EmptyDeck)) => {
                StudyView::from_session(session).with_notice(EMPTY_DECK_NOTICE)
            }
            Err(e) => {
                warn!(error = %e, "study request failed");
                StudyView::from_session(session).with_notice(e.to_string())
            }
        };
        emit(output, &format_study_view(&view, format))?;
    }

    debug!(draws = summary.draws, reveals = summary.reveals, "study session ended");
    if format == OutputFormat::Text {
        emit(
            output,
            &format!(
                "\nSession ended: {} cards drawn, {} answers revealed.\n",
                summary.draws, summary.reveals
            ),
        )?;
    }

    Ok(summary)
}

fn emit<O: Write + ?Sized>(output: &mut O, text: &str) -> Result<()> {
    output
        .write_all(text.as_bytes())
        .and_then(|()| output.flush())
        .map_err(|e| IoError::WriteFailed(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NewFlashcard;
    use crate::storage::SqliteStorage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    fn store_with(cards: &[(&str, &str)]) -> SqliteStorage {
        let mut storage = SqliteStorage::in_memory().unwrap();
        storage.init().unwrap();
        for (q, a) in cards {
            storage.create(&NewFlashcard::new(*q, *a).unwrap()).unwrap();
        }
        storage
    }

    fn run(store: &SqliteStorage, script: &str, format: OutputFormat) -> (StudySummary, String) {
        let mut session = StudySession::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = Vec::new();
        let summary = run_study(
            store,
            &mut session,
            &mut rng,
            Cursor::new(script.as_bytes()),
            &mut out,
            format,
        )
        .unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(StudyAction::parse("\n"), StudyAction::Draw);
        assert_eq!(StudyAction::parse("D"), StudyAction::Draw);
        assert_eq!(StudyAction::parse(" reveal "), StudyAction::Reveal);
        assert_eq!(StudyAction::parse("r"), StudyAction::Reveal);
        assert_eq!(StudyAction::parse("?"), StudyAction::Help);
        assert_eq!(StudyAction::parse("QUIT"), StudyAction::Quit);
        assert_eq!(
            StudyAction::parse("xyz"),
            StudyAction::Unknown("xyz".to_string())
        );
    }

    #[test]
    fn test_handle_draw_then_reveal() {
        let store = store_with(&[("Q1", "A1")]);
        let mut session = StudySession::new();
        let mut rng = StdRng::seed_from_u64(0);

        let view = handle_action(&store, &mut session, &mut rng, &StudyAction::Draw).unwrap();
        assert_eq!(view.state, StudyState::AnswerHidden);
        assert_eq!(view.question.as_deref(), Some("Q1"));
        assert!(view.answer.is_none());

        let view = handle_action(&store, &mut session, &mut rng, &StudyAction::Reveal).unwrap();
        assert_eq!(view.state, StudyState::AnswerShown);
        assert_eq!(view.answer.as_deref(), Some("A1"));

        let view = handle_action(&store, &mut session, &mut rng, &StudyAction::Draw).unwrap();
        assert_eq!(view.state, StudyState::AnswerHidden);
        assert!(view.answer.is_none());
    }

    #[test]
    fn test_handle_draw_empty_store() {
        let store = store_with(&[]);
        let mut session = StudySession::new();
        let mut rng = StdRng::seed_from_u64(0);

        let err = handle_action(&store, &mut session, &mut rng, &StudyAction::Draw).unwrap_err();
        assert!(matches!(err, Error::Study(StudyError::EmptyDeck)));
        assert_eq!(session.state(), StudyState::NoCardSelected);
    }

    #[test]
    fn test_handle_quit_and_help() {
        let store = store_with(&[("Q1", "A1")]);
        let mut session = StudySession::new();
        let mut rng = StdRng::seed_from_u64(0);
        handle_action(&store, &mut session, &mut rng, &StudyAction::Draw).unwrap();

        let view = handle_action(&store, &mut session, &mut rng, &StudyAction::Quit).unwrap();
        assert_eq!(view.state, StudyState::AnswerHidden);
        assert!(view.notice.is_none());

        let view = handle_action(&store, &mut session, &mut rng, &StudyAction::Help).unwrap();
        assert_eq!(view.notice.as_deref(), Some(HELP_TEXT));
        assert_eq!(session.state(), StudyState::AnswerHidden);
    }

    #[test]
    fn test_draw_sees_cards_added_mid_session() {
        let mut store = store_with(&[]);
        let mut session = StudySession::new();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(handle_action(&store, &mut session, &mut rng, &StudyAction::Draw).is_err());
        store.create(&NewFlashcard::new("late", "card").unwrap()).unwrap();
        let view = handle_action(&store, &mut session, &mut rng, &StudyAction::Draw).unwrap();
        assert_eq!(view.question.as_deref(), Some("late"));
    }

    #[test]
    fn test_run_study_session() {
        let store = store_with(&[("Capital of France?", "Paris")]);
        let (summary, out) = run(&store, "d\nr\nd\nq\n", OutputFormat::Text);

        assert_eq!(summary, StudySummary { draws: 2, reveals: 1 });
        assert!(out.contains("1 cards."));
        assert!(out.contains("Capital of France?"));
        assert!(out.contains("Answer: Paris"));
        assert!(out.contains("Session ended: 2 cards drawn, 1 answers revealed."));
    }

    #[test]
    fn test_run_study_ends_at_eof() {
        let store = store_with(&[("Q", "A")]);
        let (summary, _) = run(&store, "d", OutputFormat::Text);
        assert_eq!(summary.draws, 1);
    }

    #[test]
    fn test_run_study_empty_store() {
        let store = store_with(&[]);
        let (summary, out) = run(&store, "d\nr\n", OutputFormat::Text);

        assert_eq!(summary, StudySummary::default());
        assert!(out.contains(EMPTY_DECK_NOTICE));
        assert!(out.contains("no card selected"));
    }

    #[test]
    fn test_run_study_unknown_input_continues() {
        let store = store_with(&[("Q", "A")]);
        let (summary, out) = run(&store, "bogus\nd\n", OutputFormat::Text);
        assert!(out.contains("Unknown input 'bogus'"));
        assert_eq!(summary.draws, 1);
    }

    #[test]
    fn test_run_study_json_lines() {
        let store = store_with(&[("Q", "A")]);
        let (_, out) = run(&store, "d\nr\n", OutputFormat::Json);

        let views: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0]["state"], "no_card_selected");
        assert_eq!(views[1]["state"], "answer_hidden");
        assert_eq!(views[2]["answer"], "A");
    }

    #[test]
    fn test_storage_error_does_not_end_session() {
        // Table missing: every draw fails, but the loop keeps going.
        let store = SqliteStorage::in_memory().unwrap();
        let (summary, out) = run(&store, "d\nd\n", OutputFormat::Text);
        assert_eq!(summary.draws, 0);
        assert_eq!(out.matches("storage error").count(), 3);
    }
}
