//! Per-player session state machine
//!
//! One [`SessionGame`] tracks a player's progress against one day's puzzle.
//! `InProgress` is the only non-terminal state; a session ends `Won` on a
//! correct guess or `Lost` after six guesses without one. Transitions never
//! mutate in place: `submit_guess` returns the successor state, so a failed
//! submission leaves the stored state exactly as it was.

use crate::catalog::PuzzleLookup;
use crate::classify::{classify, Classification};
use serde::{Deserialize, Serialize};
use trackdle_common::model::MAX_GUESSES;
use trackdle_common::{Error, Puzzle, Result};
use uuid::Uuid;

/// One evaluated (non-skipped) guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub puzzle_id: Uuid,
    pub classification: Classification,
}

/// Session outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

/// One player's guess history and outcome for one puzzle-date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionGame {
    /// Ordered attempts; `None` is a skipped attempt
    pub guesses: Vec<Option<GuessRecord>>,
    pub outcome: Outcome,
}

impl SessionGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// True if any guess so far earned the given classification
    pub fn has_classified(&self, classification: Classification) -> bool {
        self.guesses
            .iter()
            .flatten()
            .any(|g| g.classification == classification)
    }

    /// Apply one guess (or a skip, when `guess` is `None`) and return the
    /// successor state.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyCompleted`] when the session already ended; the
    ///   caller's state is untouched and no attempt is consumed.
    /// - [`Error::InvalidInput`] when the guessed id does not resolve through
    ///   the catalog; likewise no attempt is consumed.
    pub fn submit_guess(
        &self,
        guess: Option<Uuid>,
        target: &Puzzle,
        catalog: &impl PuzzleLookup,
    ) -> Result<SessionGame> {
        if self.is_finished() {
            return Err(Error::AlreadyCompleted);
        }

        let record = match guess {
            None => None,
            Some(id) => {
                let guessed = catalog
                    .lookup(id)
                    .ok_or_else(|| Error::InvalidInput(format!("unknown puzzle id {}", id)))?;
                Some(GuessRecord {
                    puzzle_id: id,
                    classification: classify(guessed, target),
                })
            }
        };

        let won = matches!(
            record,
            Some(GuessRecord {
                classification: Classification::Correct,
                ..
            })
        );

        let mut next = self.clone();
        next.guesses.push(record);
        next.outcome = if won {
            Outcome::Won
        } else if next.guesses.len() >= MAX_GUESSES {
            Outcome::Lost
        } else {
            Outcome::InProgress
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PuzzleCatalog;

    fn puzzle(id: u128, game: &str, title: &str) -> Puzzle {
        Puzzle {
            id: Uuid::from_u128(id),
            composer: "Grant Kirkhope".to_string(),
            title: title.to_string(),
            game: game.to_string(),
            release_date: "1998-06-29".to_string(),
            extra_hint: Some("hub world".to_string()),
            source_path: String::new(),
            duration_secs: 90.0,
        }
    }

    fn fixtures() -> (Puzzle, PuzzleCatalog) {
        let target = puzzle(1, "Banjo-Kazooie", "Spiral Mountain");
        let catalog = PuzzleCatalog::new([
            target.clone(),
            puzzle(2, "Banjo-Kazooie", "Gruntilda's Lair"),
            puzzle(3, "Donkey Kong 64", "Spiral Mountain"),
            puzzle(4, "Celeste", "First Steps"),
        ]);
        (target, catalog)
    }

    #[test]
    fn correct_guess_wins() {
        let (target, catalog) = fixtures();
        let state = SessionGame::new()
            .submit_guess(Some(target.id), &target, &catalog)
            .unwrap();
        assert_eq!(state.outcome, Outcome::Won);
        assert_eq!(state.guesses.len(), 1);
    }

    #[test]
    fn skip_consumes_attempt_without_classification() {
        let (target, catalog) = fixtures();
        let state = SessionGame::new().submit_guess(None, &target, &catalog).unwrap();
        assert_eq!(state.guesses, vec![None]);
        assert_eq!(state.outcome, Outcome::InProgress);
    }

    #[test]
    fn six_misses_lose() {
        let (target, catalog) = fixtures();
        let mut state = SessionGame::new();
        for _ in 0..MAX_GUESSES {
            assert_eq!(state.outcome, Outcome::InProgress);
            state = state
                .submit_guess(Some(Uuid::from_u128(4)), &target, &catalog)
                .unwrap();
        }
        assert_eq!(state.outcome, Outcome::Lost);
        assert_eq!(state.guesses.len(), MAX_GUESSES);
    }

    #[test]
    fn win_on_the_sixth_guess() {
        let (target, catalog) = fixtures();
        let mut state = SessionGame::new();
        for _ in 0..MAX_GUESSES - 1 {
            state = state.submit_guess(None, &target, &catalog).unwrap();
        }
        state = state.submit_guess(Some(target.id), &target, &catalog).unwrap();
        assert_eq!(state.outcome, Outcome::Won);
    }

    #[test]
    fn finished_session_rejects_further_guesses() {
        let (target, catalog) = fixtures();
        let won = SessionGame::new()
            .submit_guess(Some(target.id), &target, &catalog)
            .unwrap();

        let before = won.clone();
        let result = won.submit_guess(Some(Uuid::from_u128(2)), &target, &catalog);
        assert!(matches!(result, Err(Error::AlreadyCompleted)));
        // Rejected submission left the state untouched
        assert_eq!(won, before);
    }

    #[test]
    fn unknown_id_is_invalid_and_consumes_nothing() {
        let (target, catalog) = fixtures();
        let state = SessionGame::new();
        let result = state.submit_guess(Some(Uuid::from_u128(99)), &target, &catalog);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(state.guesses.is_empty());
    }

    #[test]
    fn classifications_are_recorded_in_order() {
        let (target, catalog) = fixtures();
        let state = SessionGame::new()
            .submit_guess(Some(Uuid::from_u128(3)), &target, &catalog)
            .unwrap()
            .submit_guess(Some(Uuid::from_u128(2)), &target, &catalog)
            .unwrap();

        let classifications: Vec<_> = state
            .guesses
            .iter()
            .map(|g| g.map(|r| r.classification))
            .collect();
        assert_eq!(
            classifications,
            vec![
                Some(Classification::CorrectTitle),
                Some(Classification::CorrectGame)
            ]
        );
    }
}
