//! In-memory puzzle lookup
//!
//! Guesses arrive as puzzle ids (the client autocompletes against the
//! catalog); the session state machine resolves them through this lookup.

use std::collections::HashMap;
use trackdle_common::{db::PuzzleRepository, Puzzle, Result};
use uuid::Uuid;

/// Resolves guessed puzzle ids to their content records
pub trait PuzzleLookup {
    fn lookup(&self, id: Uuid) -> Option<&Puzzle>;
}

/// Whole-catalog lookup backed by a hash map
#[derive(Debug, Clone, Default)]
pub struct PuzzleCatalog {
    by_id: HashMap<Uuid, Puzzle>,
}

impl PuzzleCatalog {
    pub fn new(puzzles: impl IntoIterator<Item = Puzzle>) -> Self {
        Self {
            by_id: puzzles.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Load the full catalog from the puzzle repository
    pub async fn load(repo: &PuzzleRepository) -> Result<Self> {
        Ok(Self::new(repo.load_all().await?))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl PuzzleLookup for PuzzleCatalog {
    fn lookup(&self, id: Uuid) -> Option<&Puzzle> {
        self.by_id.get(&id)
    }
}
