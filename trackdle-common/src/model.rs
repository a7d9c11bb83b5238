//! Domain model for the daily puzzle rotation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of puzzles held in the active rotation window
pub const ACTIVE_WINDOW: usize = 3;

/// Number of puzzle ids retained in the no-repeat history
pub const RECENT_LIMIT: usize = 30;

/// Maximum guesses per session
pub const MAX_GUESSES: usize = 6;

/// Snippet clip lengths in seconds, shortest first. All six clips share one
/// start offset, so each clip is a time-domain prefix of the next.
pub const SNIPPET_LENGTHS: [f64; 6] = [0.5, 1.0, 2.0, 4.0, 8.0, 16.0];

/// An immutable puzzle content record. Created by the submission pipeline;
/// read-only to the rotation and session engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: Uuid,
    pub composer: String,
    pub title: String,
    pub game: String,
    /// Display text, e.g. "1998-11-21" or just "1998"
    pub release_date: String,
    pub extra_hint: Option<String>,
    /// Path to the source audio file snippets are cut from
    pub source_path: String,
    /// Duration of the source audio, used to bound the snippet offset
    pub duration_secs: f64,
}

/// Reference to one rendered snippet clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnippetRef {
    pub uri: String,
    pub start_secs: f64,
    pub length_secs: f64,
}

/// One day's playable puzzle in the rotation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEntry {
    pub puzzle_id: Uuid,
    pub date: NaiveDate,
    /// Always six clips, shortest first, sharing one start offset
    pub snippets: Vec<SnippetRef>,
}

/// Global rotation state: the active window plus the no-repeat history.
///
/// Invariants maintained by the rotation scheduler:
/// - `active` holds at most [`ACTIVE_WINDOW`] entries, one calendar day
///   apart, strictly increasing by date (empty only before first bootstrap)
/// - `recent_ids` holds at most [`RECENT_LIMIT`] ids, evicted oldest-first
/// - every id in `active` also appears in `recent_ids`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyInfo {
    pub active: Vec<ActiveEntry>,
    pub recent_ids: Vec<Uuid>,
}

impl DailyInfo {
    /// Returns the active entry for the given calendar day, if any.
    pub fn entry_for(&self, date: NaiveDate) -> Option<&ActiveEntry> {
        self.active.iter().find(|e| e.date == date)
    }

    /// Checks the structural invariants of the rotation window. Used by the
    /// rotation job and tests to catch corruption early.
    pub fn check_invariants(&self) -> crate::Result<()> {
        if self.active.len() > ACTIVE_WINDOW {
            return Err(crate::Error::Internal(format!(
                "active window holds {} entries (max {})",
                self.active.len(),
                ACTIVE_WINDOW
            )));
        }
        if self.recent_ids.len() > RECENT_LIMIT {
            return Err(crate::Error::Internal(format!(
                "recent history holds {} ids (max {})",
                self.recent_ids.len(),
                RECENT_LIMIT
            )));
        }
        for pair in self.active.windows(2) {
            if pair[1].date != pair[0].date.succ_opt().unwrap_or(pair[0].date) {
                return Err(crate::Error::Internal(format!(
                    "active dates not consecutive: {} then {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        for entry in &self.active {
            if !self.recent_ids.contains(&entry.puzzle_id) {
                return Err(crate::Error::Internal(format!(
                    "active puzzle {} missing from recent history",
                    entry.puzzle_id
                )));
            }
        }
        Ok(())
    }
}
