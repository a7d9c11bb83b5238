//! Puzzle repository
//!
//! Read side of the puzzle catalog plus the random no-repeat selection the
//! rotation scheduler draws from. Inserts exist for the submission pipeline
//! and test fixtures; puzzle content is never mutated here.

use crate::{Error, Puzzle, Result};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct PuzzleRow {
    guid: String,
    composer: String,
    title: String,
    game: String,
    release_date: String,
    extra_hint: Option<String>,
    source_path: String,
    duration_secs: f64,
}

impl TryFrom<PuzzleRow> for Puzzle {
    type Error = Error;

    fn try_from(row: PuzzleRow) -> Result<Puzzle> {
        let id = Uuid::parse_str(&row.guid)
            .map_err(|e| Error::Internal(format!("malformed puzzle guid '{}': {}", row.guid, e)))?;
        Ok(Puzzle {
            id,
            composer: row.composer,
            title: row.title,
            game: row.game,
            release_date: row.release_date,
            extra_hint: row.extra_hint,
            source_path: row.source_path,
            duration_secs: row.duration_secs,
        })
    }
}

const SELECT_COLUMNS: &str =
    "guid, composer, title, game, release_date, extra_hint, source_path, duration_secs";

/// Repository over the puzzles table
#[derive(Debug, Clone)]
pub struct PuzzleRepository {
    pool: SqlitePool,
}

impl PuzzleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a puzzle content record
    pub async fn insert(&self, puzzle: &Puzzle) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO puzzles (guid, composer, title, game, release_date, extra_hint, source_path, duration_secs)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(puzzle.id.to_string())
        .bind(&puzzle.composer)
        .bind(&puzzle.title)
        .bind(&puzzle.game)
        .bind(&puzzle.release_date)
        .bind(&puzzle.extra_hint)
        .bind(&puzzle.source_path)
        .bind(puzzle.duration_secs)
        .execute(&self.pool)
        .await?;

        info!("Inserted puzzle {} ({} / {})", puzzle.id, puzzle.game, puzzle.title);
        Ok(())
    }

    /// Get a puzzle by id. Returns `None` if not found.
    pub async fn get(&self, id: Uuid) -> Result<Option<Puzzle>> {
        let row = sqlx::query_as::<_, PuzzleRow>(&format!(
            "SELECT {} FROM puzzles WHERE guid = ?",
            SELECT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Puzzle::try_from).transpose()
    }

    /// Number of puzzle records
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM puzzles")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Load the full catalog, ordered by insertion time. Used to build the
    /// in-memory lookup the guess evaluator resolves against.
    pub async fn load_all(&self) -> Result<Vec<Puzzle>> {
        let rows = sqlx::query_as::<_, PuzzleRow>(&format!(
            "SELECT {} FROM puzzles ORDER BY created_at, guid",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Puzzle::try_from).collect()
    }

    /// Pick `count` distinct puzzles at random, excluding the given ids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] when fewer than `count` distinct,
    /// non-excluded puzzles exist.
    pub async fn pick_random_excluding(&self, exclude: &[Uuid], count: usize) -> Result<Vec<Puzzle>> {
        debug!("Picking {} puzzles, {} excluded", count, exclude.len());

        let mut builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new(format!("SELECT {} FROM puzzles", SELECT_COLUMNS));
        if !exclude.is_empty() {
            builder.push(" WHERE guid NOT IN (");
            let mut ids = builder.separated(", ");
            for id in exclude {
                ids.push_bind(id.to_string());
            }
            ids.push_unseparated(")");
        }
        builder.push(" ORDER BY RANDOM() LIMIT ");
        builder.push_bind(count as i64);

        let rows: Vec<PuzzleRow> = builder.build_query_as().fetch_all(&self.pool).await?;

        if rows.len() < count {
            return Err(Error::InsufficientData(format!(
                "requested {} puzzles, only {} available outside the recent history",
                count,
                rows.len()
            )));
        }

        rows.into_iter().map(Puzzle::try_from).collect()
    }
}
