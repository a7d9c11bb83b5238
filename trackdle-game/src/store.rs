//! Session persistence
//!
//! Stores one [`SessionGame`] JSON payload per (session id, date key). The
//! upsert replaces the whole payload; serializing concurrent writers for the
//! same key is the embedding layer's job, the payload itself is just data.

use crate::session::SessionGame;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;
use trackdle_common::{time, Result};

/// Repository over the game_sessions table
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load a player's state for one puzzle-date. `None` until the player
    /// submits their first guess for that date.
    pub async fn get(&self, session_id: &str, date: NaiveDate) -> Result<Option<SessionGame>> {
        let payload: Option<String> = sqlx::query_scalar(
            "SELECT payload FROM game_sessions WHERE session_id = ? AND date_key = ?",
        )
        .bind(session_id)
        .bind(time::date_key(date))
        .fetch_optional(&self.pool)
        .await?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Upsert a player's state for one puzzle-date
    pub async fn put(&self, session_id: &str, date: NaiveDate, state: &SessionGame) -> Result<()> {
        let payload = serde_json::to_string(state)?;

        sqlx::query(
            r#"
            INSERT INTO game_sessions (session_id, date_key, payload)
            VALUES (?, ?, ?)
            ON CONFLICT (session_id, date_key)
            DO UPDATE SET payload = excluded.payload, updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(session_id)
        .bind(time::date_key(date))
        .bind(&payload)
        .execute(&self.pool)
        .await?;

        debug!(
            "Stored session {} for {} ({} guesses)",
            session_id,
            date,
            state.guesses.len()
        );
        Ok(())
    }
}
