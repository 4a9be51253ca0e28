//! Pending join request repository implementation

use sqlx::{Row, SqlitePool};
use chrono::{DateTime, Utc};
use crate::models::join_request::PendingJoinRequest;
use crate::utils::errors::ChatWardenError;

#[derive(Debug, Clone)]
pub struct JoinRequestRepository {
    pool: SqlitePool,
}

impl JoinRequestRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store an in-flight challenge; one per user
    pub async fn upsert(&self, request: &PendingJoinRequest) -> Result<(), ChatWardenError> {
        let request_data = serde_json::to_string(&request.request_data)?;
        let answers = serde_json::to_string(&request.answers)?;

        sqlx::query(
            r#"
            INSERT INTO pending_requests (user_id, chat_id, request_data, answers, expected_answer, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                chat_id = excluded.chat_id,
                request_data = excluded.request_data,
                answers = excluded.answers,
                expected_answer = excluded.expected_answer,
                created_at = excluded.created_at
            "#
        )
        .bind(request.user_id)
        .bind(request.chat_id)
        .bind(request_data)
        .bind(answers)
        .bind(&request.expected_answer)
        .bind(request.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Load the pending challenge for a user, if any
    pub async fn find(&self, user_id: i64) -> Result<Option<PendingJoinRequest>, ChatWardenError> {
        let row = sqlx::query(
            "SELECT user_id, chat_id, request_data, answers, expected_answer, created_at FROM pending_requests WHERE user_id = ?"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let request_data: String = row.try_get("request_data")?;
                let answers: String = row.try_get("answers")?;
                let created_at: DateTime<Utc> = row.try_get("created_at")?;

                Ok(Some(PendingJoinRequest {
                    user_id: row.try_get("user_id")?,
                    chat_id: row.try_get("chat_id")?,
                    request_data: serde_json::from_str(&request_data)?,
                    answers: serde_json::from_str(&answers)?,
                    expected_answer: row.try_get("expected_answer")?,
                    created_at,
                }))
            }
            None => Ok(None),
        }
    }

    /// Destroy a challenge after approval or decline
    pub async fn delete(&self, user_id: i64) -> Result<(), ChatWardenError> {
        sqlx::query("DELETE FROM pending_requests WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Drop challenges older than the cutoff; returns removed count
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, ChatWardenError> {
        let result = sqlx::query("DELETE FROM pending_requests WHERE created_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
