//! SQLite-backed puzzle picker

use crate::rotation::PuzzlePicker;
use trackdle_common::{db::PuzzleRepository, Puzzle, Result};
use uuid::Uuid;

/// Draws rotation puzzles at random from the puzzles table
#[derive(Debug, Clone)]
pub struct SqlitePuzzlePicker {
    puzzles: PuzzleRepository,
}

impl SqlitePuzzlePicker {
    pub fn new(puzzles: PuzzleRepository) -> Self {
        Self { puzzles }
    }
}

impl PuzzlePicker for SqlitePuzzlePicker {
    async fn pick_excluding(&self, exclude: &[Uuid], count: usize) -> Result<Vec<Puzzle>> {
        self.puzzles.pick_random_excluding(exclude, count).await
    }
}
