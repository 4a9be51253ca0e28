//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod history;
pub mod join_request;

// Re-export commonly used models
pub use user::{User, UserStatus, ObservedUser};
pub use history::{HistoryEntry, AuditAction};
pub use join_request::PendingJoinRequest;
