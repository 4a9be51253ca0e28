//! Pending join request model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// An in-flight join challenge for one user.
///
/// Created when challenge mode puts a new member behind the verification
/// gate; destroyed on approval, decline, or expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingJoinRequest {
    pub user_id: i64,
    pub chat_id: i64,
    pub request_data: serde_json::Value,
    pub answers: serde_json::Value,
    /// The identity expected to activate the challenge control
    pub expected_answer: String,
    pub created_at: DateTime<Utc>,
}

impl PendingJoinRequest {
    /// Build the challenge record for a newly restricted member
    pub fn for_member(user_id: i64, chat_id: i64, request_data: serde_json::Value) -> Self {
        Self {
            user_id,
            chat_id,
            request_data,
            answers: serde_json::json!({}),
            expected_answer: user_id.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Check whether an activation by `responder_id` satisfies the challenge
    pub fn matches(&self, responder_id: i64) -> bool {
        self.expected_answer == responder_id.to_string()
    }
}
