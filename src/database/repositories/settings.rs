//! Settings repository implementation
//!
//! Raw key/value access to the settings table. Values are stored as
//! JSON-encoded text; typing and validation live in the settings service.

use sqlx::SqlitePool;
use crate::utils::errors::ChatWardenError;

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the raw JSON value stored under a key
    pub async fn fetch(&self, key: &str) -> Result<Option<String>, ChatWardenError> {
        let value: Option<String> = sqlx::query_scalar(
            "SELECT value FROM settings WHERE key = ?"
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    /// Upsert a raw JSON value; last write wins
    pub async fn upsert(&self, key: &str, value: &str) -> Result<(), ChatWardenError> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Count stored settings rows
    pub async fn count(&self) -> Result<i64, ChatWardenError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
