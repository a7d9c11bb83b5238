//! Database initialization
//!
//! Creates the database on first run and brings the schema up idempotently;
//! safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use sqlite options to create database if it doesn't exist
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL mode allows concurrent readers with one writer; the rotation job
    // and player-facing readers share this database
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    // Set busy timeout
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_puzzles_table(&pool).await?;
    create_daily_info_table(&pool).await?;
    create_game_sessions_table(&pool).await?;

    Ok(pool)
}

/// Create the puzzles table
///
/// Stores the immutable puzzle content records the rotation draws from.
async fn create_puzzles_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS puzzles (
            guid TEXT PRIMARY KEY,
            composer TEXT NOT NULL,
            title TEXT NOT NULL,
            game TEXT NOT NULL,
            release_date TEXT NOT NULL,
            extra_hint TEXT,
            source_path TEXT NOT NULL,
            duration_secs REAL NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (duration_secs > 0.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_puzzles_game ON puzzles(game)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Create the daily_info table
///
/// Single-row rotation record (active window + recent history) stored as a
/// JSON payload. The version column is an optimistic-concurrency token: a
/// save with a stale version is rejected, so a rotation step that raced
/// another writer fails loudly instead of corrupting the window.
async fn create_daily_info_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS daily_info (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            payload TEXT NOT NULL,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (version > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the game_sessions table
///
/// Per-player, per-date guess state as a JSON payload. Upserts are keyed by
/// (session_id, date_key) so one player has one state per calendar day.
async fn create_game_sessions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS game_sessions (
            session_id TEXT NOT NULL,
            date_key TEXT NOT NULL,
            payload TEXT NOT NULL,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (session_id, date_key)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_game_sessions_date ON game_sessions(date_key)")
        .execute(pool)
        .await?;

    Ok(())
}
