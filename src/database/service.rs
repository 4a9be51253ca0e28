//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, HistoryRepository, JoinRequestRepository, SettingsRepository, UserRepository};
use crate::models::{ObservedUser, User, UserStatus};
use crate::utils::errors::ChatWardenError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub settings: SettingsRepository,
    pub users: UserRepository,
    pub history: HistoryRepository,
    pub join_requests: JoinRequestRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            settings: SettingsRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            history: HistoryRepository::new(pool.clone()),
            join_requests: JoinRequestRepository::new(pool),
        }
    }

    /// Register a user on first observed interaction
    pub async fn observe_user(&self, observed: &ObservedUser) -> Result<User, ChatWardenError> {
        self.users.upsert_observed(observed).await
    }

    /// Mark a user banned (soft transition; row is kept)
    pub async fn mark_banned(&self, user_id: i64) -> Result<(), ChatWardenError> {
        self.users.set_status(user_id, UserStatus::Banned).await
    }

    /// Mark a user approved after verification
    pub async fn mark_approved(&self, user_id: i64) -> Result<(), ChatWardenError> {
        self.users.set_status(user_id, UserStatus::Approved).await
    }
}
