//! User repository implementation

use sqlx::SqlitePool;
use chrono::Utc;
use crate::models::user::{ObservedUser, User, UserStatus};
use crate::utils::errors::ChatWardenError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a user seen in an interaction.
    ///
    /// Creates the row on first contact; subsequent calls refresh the
    /// display fields and leave status untouched.
    pub async fn upsert_observed(&self, observed: &ObservedUser) -> Result<User, ChatWardenError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, username, full_name, language, joined_at, status)
            VALUES (?, ?, ?, ?, ?, 'pending')
            ON CONFLICT (user_id) DO UPDATE SET
                username = excluded.username,
                full_name = excluded.full_name,
                language = excluded.language
            RETURNING user_id, username, full_name, language, joined_at, status
            "#
        )
        .bind(observed.user_id)
        .bind(&observed.username)
        .bind(&observed.full_name)
        .bind(&observed.language)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by platform id
    pub async fn find(&self, user_id: i64) -> Result<Option<User>, ChatWardenError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT user_id, username, full_name, language, joined_at, status FROM users WHERE user_id = ?"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update membership status; soft state transition only
    pub async fn set_status(&self, user_id: i64, status: UserStatus) -> Result<(), ChatWardenError> {
        sqlx::query("UPDATE users SET status = ? WHERE user_id = ?")
            .bind(status)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List every known user id (broadcast recipients)
    pub async fn list_ids(&self) -> Result<Vec<i64>, ChatWardenError> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT user_id FROM users ORDER BY user_id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    /// List all user rows (CSV export)
    pub async fn list_all(&self) -> Result<Vec<User>, ChatWardenError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT user_id, username, full_name, language, joined_at, status FROM users ORDER BY joined_at ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count known users
    pub async fn count(&self) -> Result<i64, ChatWardenError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
