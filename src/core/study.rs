//! Study mode session state.
//!
//! A [`StudySession`] holds the card currently under review and whether its
//! answer has been revealed. Each interactive session owns its own value, so
//! concurrent sessions never share a reveal flag.

use crate::core::Flashcard;
use crate::error::StudyError;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Observable state of a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyState {
    /// Nothing drawn yet in this session.
    NoCardSelected,
    /// A card is showing its question only.
    AnswerHidden,
    /// A card is showing question and answer.
    AnswerShown,
}

/// Study session context passed into each study request.
///
/// # Examples
///
/// ```
/// use flashcards::core::{Flashcard, StudySession, StudyState};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let cards = vec![Flashcard {
///     id: 1,
///     question: "2 + 2?".to_string(),
///     answer: "4".to_string(),
///     created_at: "2024-01-01 00:00:00".to_string(),
/// }];
///
/// let mut session = StudySession::new();
/// let mut rng = StdRng::seed_from_u64(7);
/// session.draw(&cards, &mut rng).unwrap();
/// assert_eq!(session.state(), StudyState::AnswerHidden);
/// assert_eq!(session.reveal().unwrap(), "4");
/// assert_eq!(session.state(), StudyState::AnswerShown);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StudySession {
    current: Option<Flashcard>,
    revealed: bool,
}

impl StudySession {
    /// Creates a session in [`StudyState::NoCardSelected`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of the session.
    #[must_use]
    pub const fn state(&self) -> StudyState {
        match (&self.current, self.revealed) {
            (None, _) => StudyState::NoCardSelected,
            (Some(_), false) => StudyState::AnswerHidden,
            (Some(_), true) => StudyState::AnswerShown,
        }
    }

    /// The card under review, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Flashcard> {
        self.current.as_ref()
    }

    /// The answer of the current card, only once revealed.
    #[must_use]
    pub fn visible_answer(&self) -> Option<&str> {
        if self.revealed {
            self.current.as_ref().map(|card| card.answer.as_str())
        } else {
            None
        }
    }

    /// Picks a card uniformly at random and hides its answer.
    ///
    /// Draws are independent, so the same card may come up again. The chosen
    /// card is cloned into the session and stays valid even if it is later
    /// deleted from the store.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::EmptyDeck`] when `cards` is empty; the session
    /// is left untouched.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        cards: &[Flashcard],
        rng: &mut R,
    ) -> Result<&Flashcard, StudyError> {
        let card = cards.choose(rng).ok_or(StudyError::EmptyDeck)?;
        self.revealed = false;
        Ok(&*self.current.insert(card.clone()))
    }

    /// Reveals the answer of the current card.
    ///
    /// Revealing an already revealed card is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::NoCardSelected`] if nothing has been drawn.
    pub fn reveal(&mut self) -> Result<&str, StudyError> {
        let card = self.current.as_ref().ok_or(StudyError::NoCardSelected)?;
        self.revealed = true;
        Ok(&card.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn deck(n: i64) -> Vec<Flashcard> {
        (1..=n)
            .map(|id| Flashcard {
                id,
                question: format!("Q{id}"),
                answer: format!("A{id}"),
                created_at: "2024-01-01 00:00:00".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let session = StudySession::new();
        assert_eq!(session.state(), StudyState::NoCardSelected);
        assert!(session.current().is_none());
        assert!(session.visible_answer().is_none());
    }

    #[test]
    fn test_draw_empty_deck_rejected() {
        let mut session = StudySession::new();
        let mut rng = StdRng::seed_from_u64(1);
        let err = session.draw(&[], &mut rng).unwrap_err();
        assert_eq!(err, StudyError::EmptyDeck);
        assert_eq!(session.state(), StudyState::NoCardSelected);
    }

    #[test]
    fn test_draw_empty_deck_keeps_selected_card() {
        let cards = deck(1);
        let mut session = StudySession::new();
        let mut rng = StdRng::seed_from_u64(1);
        session.draw(&cards, &mut rng).unwrap();
        session.reveal().unwrap();

        assert!(session.draw(&[], &mut rng).is_err());
        assert_eq!(session.state(), StudyState::AnswerShown);
        assert_eq!(session.current().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_single_card_full_cycle() {
        let cards = deck(1);
        let mut session = StudySession::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..5 {
            let drawn = session.draw(&cards, &mut rng).unwrap();
            assert_eq!(drawn.id, 1);
            assert_eq!(session.state(), StudyState::AnswerHidden);
            assert!(session.visible_answer().is_none());

            assert_eq!(session.reveal().unwrap(), "A1");
            assert_eq!(session.state(), StudyState::AnswerShown);
            assert_eq!(session.visible_answer(), Some("A1"));
        }
    }

    #[test]
    fn test_reveal_without_card() {
        let mut session = StudySession::new();
        assert_eq!(session.reveal().unwrap_err(), StudyError::NoCardSelected);
        assert_eq!(session.state(), StudyState::NoCardSelected);
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let cards = deck(2);
        let mut session = StudySession::new();
        let mut rng = StdRng::seed_from_u64(3);
        session.draw(&cards, &mut rng).unwrap();
        session.reveal().unwrap();
        session.reveal().unwrap();
        assert_eq!(session.state(), StudyState::AnswerShown);
    }

    #[test]
    fn test_draw_reaches_every_card() {
        let cards = deck(4);
        let mut session = StudySession::new();
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(session.draw(&cards, &mut rng).unwrap().id);
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let cards = deck(10);
        let draws = |seed| {
            let mut session = StudySession::new();
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| session.draw(&cards, &mut rng).unwrap().id)
                .collect::<Vec<_>>()
        };
        assert_eq!(draws(5), draws(5));
    }

    #[test]
    fn test_sessions_are_independent() {
        let cards = deck(1);
        let mut rng = StdRng::seed_from_u64(0);
        let mut first = StudySession::new();
        let mut second = StudySession::new();

        first.draw(&cards, &mut rng).unwrap();
        first.reveal().unwrap();
        second.draw(&cards, &mut rng).unwrap();

        assert_eq!(first.state(), StudyState::AnswerShown);
        assert_eq!(second.state(), StudyState::AnswerHidden);
    }
}
