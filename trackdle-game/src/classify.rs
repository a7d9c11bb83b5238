//! Guess evaluator

use serde::{Deserialize, Serialize};
use trackdle_common::Puzzle;

/// How a guessed puzzle relates to the day's target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Exact puzzle match
    Correct,
    /// Different track, same game
    CorrectGame,
    /// Different track, same title
    CorrectTitle,
    Incorrect,
}

/// Classify a guess against the target puzzle.
///
/// Precedence is fixed: exact id, then game match, then title match. A guess
/// from the right game wins over one sharing only the title; that ordering is
/// player-visible game behavior and must not be reordered.
pub fn classify(guessed: &Puzzle, target: &Puzzle) -> Classification {
    if guessed.id == target.id {
        Classification::Correct
    } else if guessed.game == target.game {
        Classification::CorrectGame
    } else if guessed.title == target.title {
        Classification::CorrectTitle
    } else {
        Classification::Incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn puzzle(id: u128, game: &str, title: &str) -> Puzzle {
        Puzzle {
            id: Uuid::from_u128(id),
            composer: "Koji Kondo".to_string(),
            title: title.to_string(),
            game: game.to_string(),
            release_date: "1998".to_string(),
            extra_hint: None,
            source_path: String::new(),
            duration_secs: 60.0,
        }
    }

    #[test]
    fn same_id_is_correct() {
        let target = puzzle(1, "Ocarina of Time", "Gerudo Valley");
        assert_eq!(classify(&target, &target), Classification::Correct);
    }

    #[test]
    fn same_game_beats_same_title() {
        let target = puzzle(1, "Ocarina of Time", "Main Theme");
        // Shares both game and title with the target; game match wins
        let guess = puzzle(2, "Ocarina of Time", "Main Theme");
        assert_eq!(classify(&guess, &target), Classification::CorrectGame);
    }

    #[test]
    fn same_title_different_game() {
        let target = puzzle(1, "Ocarina of Time", "Main Theme");
        let guess = puzzle(2, "Majora's Mask", "Main Theme");
        assert_eq!(classify(&guess, &target), Classification::CorrectTitle);
    }

    #[test]
    fn unrelated_guess_is_incorrect() {
        let target = puzzle(1, "Ocarina of Time", "Gerudo Valley");
        let guess = puzzle(2, "Celeste", "Resurrections");
        assert_eq!(classify(&guess, &target), Classification::Incorrect);
    }
}
