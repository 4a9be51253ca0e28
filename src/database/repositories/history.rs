//! History repository implementation
//!
//! The audit trail is append-only; the core exposes insertion only.

use sqlx::SqlitePool;
use crate::models::history::HistoryEntry;
use crate::utils::errors::ChatWardenError;

#[derive(Debug, Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
}

impl HistoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append an audit record; immutable once written
    pub async fn insert(&self, entry: &HistoryEntry) -> Result<(), ChatWardenError> {
        let details = serde_json::to_string(&entry.details)?;

        sqlx::query(
            r#"
            INSERT INTO history (id, user_id, action, timestamp, details, admin_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&entry.id)
        .bind(entry.user_id)
        .bind(entry.action.as_str())
        .bind(entry.timestamp)
        .bind(details)
        .bind(entry.admin_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Count audit records (liveness/statistics)
    pub async fn count(&self) -> Result<i64, ChatWardenError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM history")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
