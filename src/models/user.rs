//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Membership status of a user within the managed group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Pending,
    Approved,
    Banned,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Approved => "approved",
            UserStatus::Banned => "banned",
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member observed by the bot; created on first interaction,
/// never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: Option<String>,
    pub full_name: String,
    pub language: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub status: UserStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservedUser {
    pub user_id: i64,
    pub username: Option<String>,
    pub full_name: String,
    pub language: Option<String>,
}

impl ObservedUser {
    pub fn from_telegram(user: &teloxide::types::User) -> Self {
        Self {
            user_id: user.id.0 as i64,
            username: user.username.clone(),
            full_name: user.full_name(),
            language: user.language_code.clone(),
        }
    }
}
