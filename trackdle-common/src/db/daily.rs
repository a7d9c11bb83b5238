//! Rotation record persistence
//!
//! The rotation window is a single JSON row guarded by a version token.
//! The daily job loads `(DailyInfo, version)`, computes the next window in
//! memory, and saves with the version it loaded; a stale save fails with
//! [`Error::Conflict`] so a doubled rotation run cannot silently corrupt
//! the window.

use crate::{DailyInfo, Error, Result};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Repository over the single-row daily_info table
#[derive(Debug, Clone)]
pub struct DailyInfoRepository {
    pool: SqlitePool,
}

impl DailyInfoRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Load the rotation record and its version token.
    ///
    /// Before the first bootstrap there is no row; returns an empty
    /// [`DailyInfo`] at version 0.
    pub async fn load(&self) -> Result<(DailyInfo, i64)> {
        let row: Option<(i64, String)> =
            sqlx::query_as("SELECT version, payload FROM daily_info WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((version, payload)) => {
                let info: DailyInfo = serde_json::from_str(&payload)?;
                debug!("Loaded rotation record at version {}", version);
                Ok((info, version))
            }
            None => {
                debug!("No rotation record yet; returning empty window");
                Ok((DailyInfo::default(), 0))
            }
        }
    }

    /// Atomically replace the rotation record.
    ///
    /// `expected_version` must be the version returned by [`load`]; the save
    /// fails with [`Error::Conflict`] if another writer committed first.
    ///
    /// [`load`]: DailyInfoRepository::load
    pub async fn save(&self, expected_version: i64, info: &DailyInfo) -> Result<()> {
        let payload = serde_json::to_string(info)?;

        let affected = if expected_version == 0 {
            sqlx::query(
                "INSERT OR IGNORE INTO daily_info (id, version, payload) VALUES (1, 1, ?)",
            )
            .bind(&payload)
            .execute(&self.pool)
            .await?
            .rows_affected()
        } else {
            sqlx::query(
                r#"
                UPDATE daily_info
                SET version = version + 1, payload = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = 1 AND version = ?
                "#,
            )
            .bind(&payload)
            .bind(expected_version)
            .execute(&self.pool)
            .await?
            .rows_affected()
        };

        if affected != 1 {
            return Err(Error::Conflict(format!(
                "rotation record moved past version {}; reload and retry",
                expected_version
            )));
        }

        info!(
            "Saved rotation record at version {} ({} active, {} recent)",
            expected_version + 1,
            info.active.len(),
            info.recent_ids.len()
        );
        Ok(())
    }
}
