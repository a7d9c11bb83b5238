//! Daily rotation scheduler
//!
//! Advances the global rotation window by exactly one calendar day per
//! invocation. The scheduler never mutates its input: it returns the next
//! window, and the caller commits it (with the store's version token) before
//! discarding any retired snippet clips. A failed pick or render therefore
//! leaves the previously committed window authoritative, to be retried on
//! the next scheduled run.
//!
//! Once-per-day, single-writer execution is the caller's contract; the
//! scheduler itself does not detect a second run on the same day, but the
//! rotation record's version token turns that race into a save conflict.

use crate::snippet::choose_offset;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use tracing::info;
use trackdle_common::model::{ACTIVE_WINDOW, RECENT_LIMIT};
use trackdle_common::{ActiveEntry, DailyInfo, Error, Puzzle, Result, SnippetRef};
use uuid::Uuid;

/// Selects puzzles for rotation, excluding recently used ids
#[allow(async_fn_in_trait)]
pub trait PuzzlePicker {
    /// Return exactly `count` distinct puzzles whose ids are not in
    /// `exclude`; [`Error::InsufficientData`] when that is impossible.
    async fn pick_excluding(&self, exclude: &[Uuid], count: usize) -> Result<Vec<Puzzle>>;
}

/// Renders the six nested snippet clips for a puzzle
#[allow(async_fn_in_trait)]
pub trait SnippetRenderer {
    /// Cut all six tiers from `offset_secs`, shortest first. All-or-nothing:
    /// on [`Error::Render`] no clips for this puzzle remain behind.
    async fn render(&self, puzzle: &Puzzle, offset_secs: f64) -> Result<Vec<SnippetRef>>;

    /// Delete the clips of a retired rotation entry
    async fn discard(&self, refs: &[SnippetRef]) -> Result<()>;
}

/// Result of one rotation step
#[derive(Debug, Clone)]
pub struct Rotation {
    /// The next rotation window, ready to commit
    pub info: DailyInfo,
    /// Entry dropped from the window; its clips should be discarded after
    /// the new window is committed
    pub evicted: Option<ActiveEntry>,
}

/// Advance the rotation window by one calendar day.
///
/// Bootstrap (empty window): picks three puzzles dated yesterday, today and
/// tomorrow. Steady state: picks one puzzle for the day after the current
/// last entry, drops the oldest entry past the window size, and appends to
/// the bounded no-repeat history.
pub async fn advance_day<P, R>(
    info: &DailyInfo,
    today: NaiveDate,
    picker: &P,
    renderer: &R,
    rng: &mut impl Rng,
) -> Result<Rotation>
where
    P: PuzzlePicker,
    R: SnippetRenderer,
{
    if info.active.is_empty() {
        return bootstrap(today, picker, renderer, rng).await;
    }

    let last_date = info
        .active
        .last()
        .map(|e| e.date)
        .ok_or_else(|| Error::Internal("active window empty past bootstrap".to_string()))?;

    let picked = picker.pick_excluding(&info.recent_ids, 1).await?;
    let puzzle = take_exact(picked, 1)?.remove(0);

    let entry = render_entry(&puzzle, last_date + Duration::days(1), renderer, rng).await?;

    let mut next = info.clone();
    next.active.push(entry);

    let mut evicted = None;
    if next.active.len() > ACTIVE_WINDOW {
        let oldest = next
            .active
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| e.date)
            .map(|(i, _)| i)
            .ok_or_else(|| Error::Internal("window non-empty but no oldest entry".to_string()))?;
        evicted = Some(next.active.remove(oldest));
    }

    next.recent_ids.push(puzzle.id);
    while next.recent_ids.len() > RECENT_LIMIT {
        next.recent_ids.remove(0);
    }

    info!(
        "Rotated window forward: {} now active through {}, {} in recent history",
        puzzle.id,
        last_date + Duration::days(1),
        next.recent_ids.len()
    );
    Ok(Rotation { info: next, evicted })
}

async fn bootstrap<P, R>(
    today: NaiveDate,
    picker: &P,
    renderer: &R,
    rng: &mut impl Rng,
) -> Result<Rotation>
where
    P: PuzzlePicker,
    R: SnippetRenderer,
{
    let picked = picker.pick_excluding(&[], ACTIVE_WINDOW).await?;
    let picked = take_exact(picked, ACTIVE_WINDOW)?;

    let mut next = DailyInfo::default();
    for (i, puzzle) in picked.iter().enumerate() {
        let date = today + Duration::days(i as i64 - 1);
        let entry = render_entry(puzzle, date, renderer, rng).await?;
        next.active.push(entry);
        next.recent_ids.push(puzzle.id);
    }

    info!(
        "Bootstrapped rotation window: {} puzzles dated {} through {}",
        ACTIVE_WINDOW,
        today - Duration::days(1),
        today + Duration::days(1)
    );
    Ok(Rotation { info: next, evicted: None })
}

async fn render_entry<R: SnippetRenderer>(
    puzzle: &Puzzle,
    date: NaiveDate,
    renderer: &R,
    rng: &mut impl Rng,
) -> Result<ActiveEntry> {
    let offset = choose_offset(puzzle.duration_secs, rng);
    let snippets = renderer.render(puzzle, offset).await?;
    Ok(ActiveEntry {
        puzzle_id: puzzle.id,
        date,
        snippets,
    })
}

/// The picker contract already promises an exact count; this keeps a
/// misbehaving implementation from shrinking or padding the window.
fn take_exact(picked: Vec<Puzzle>, count: usize) -> Result<Vec<Puzzle>> {
    if picked.len() != count {
        return Err(Error::InsufficientData(format!(
            "picker returned {} puzzles, expected {}",
            picked.len(),
            count
        )));
    }
    let mut seen = std::collections::HashSet::new();
    for p in &picked {
        if !seen.insert(p.id) {
            return Err(Error::InsufficientData(format!(
                "picker returned duplicate puzzle {}",
                p.id
            )));
        }
    }
    Ok(picked)
}
