//! Audit service implementation
//!
//! Append-only record of moderation and administration actions. A failed
//! write propagates: the enclosing action must be treated as not having
//! happened.

use chrono::Utc;
use tracing::debug;
use crate::database::HistoryRepository;
use crate::models::{AuditAction, HistoryEntry};
use crate::utils::errors::Result;
use crate::utils::helpers::generate_uuid;

#[derive(Debug, Clone)]
pub struct AuditService {
    repository: HistoryRepository,
}

impl AuditService {
    pub fn new(repository: HistoryRepository) -> Self {
        Self { repository }
    }

    /// Append an audit record and return its id.
    ///
    /// `admin_id` is None for system-triggered actions.
    pub async fn record(
        &self,
        subject_user_id: i64,
        action: AuditAction,
        details: serde_json::Value,
        admin_id: Option<i64>,
    ) -> Result<String> {
        let entry = HistoryEntry {
            id: generate_uuid(),
            user_id: subject_user_id,
            action,
            timestamp: Utc::now(),
            details,
            admin_id,
        };

        self.repository.insert(&entry).await?;
        debug!(
            entry_id = %entry.id,
            user_id = subject_user_id,
            action = %action,
            admin_id = ?admin_id,
            "Audit record written"
        );

        Ok(entry.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_service() -> AuditService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        AuditService::new(HistoryRepository::new(pool))
    }

    #[tokio::test]
    async fn test_record_returns_unique_ids() {
        let service = test_service().await;

        let first = service
            .record(1, AuditAction::Ban, serde_json::json!({"reason": "spam"}), Some(42))
            .await
            .unwrap();
        let second = service
            .record(1, AuditAction::Unban, serde_json::json!({}), Some(42))
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(service.repository.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_system_action_has_no_admin() {
        let service = test_service().await;
        let id = service
            .record(7, AuditAction::Verify, serde_json::json!({"chat_id": -100}), None)
            .await
            .unwrap();
        assert!(!id.is_empty());
    }
}
