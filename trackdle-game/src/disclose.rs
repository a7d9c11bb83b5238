//! Progressive hint disclosure
//!
//! Maps a session's guess history to the puzzle fields and snippet tier the
//! player may see. Pure in `(guesses, outcome)`: the history only grows and
//! the outcome never leaves a terminal state, so disclosure is monotonic —
//! a field revealed once can never disappear on a later query.

use crate::classify::Classification;
use crate::session::SessionGame;
use serde::Serialize;
use trackdle_common::model::SNIPPET_LENGTHS;
use trackdle_common::Puzzle;

/// The player-visible slice of the target puzzle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PuzzleView {
    /// Index into the six snippet tiers the player may listen to
    pub snippet_index: usize,
    pub composer: Option<String>,
    pub title: Option<String>,
    pub game: Option<String>,
    pub release_date: Option<String>,
    pub extra_hint: Option<String>,
}

/// Compute the visible fields for a session against its target puzzle.
///
/// Reveal thresholds by consumed attempts: `release_date` at 3, `extra_hint`
/// at 4, `game` at 5. `game` also unlocks early on any `CorrectGame` guess,
/// and `title` unlocks only on a `CorrectTitle` guess. Every field is visible
/// once the session ends, and the longest snippet tier plays.
pub fn visible_fields(state: &SessionGame, target: &Puzzle) -> PuzzleView {
    let attempts = state.guesses.len();
    let done = state.is_finished();
    let last_tier = SNIPPET_LENGTHS.len() - 1;

    let snippet_index = if done { last_tier } else { attempts.min(last_tier) };
    let game_matched = state.has_classified(Classification::CorrectGame);
    let title_matched = state.has_classified(Classification::CorrectTitle);

    PuzzleView {
        snippet_index,
        composer: done.then(|| target.composer.clone()),
        title: (done || title_matched).then(|| target.title.clone()),
        game: (done || attempts >= 5 || game_matched).then(|| target.game.clone()),
        release_date: (done || attempts >= 3).then(|| target.release_date.clone()),
        extra_hint: (done || attempts >= 4)
            .then(|| target.extra_hint.clone())
            .flatten(),
    }
}
