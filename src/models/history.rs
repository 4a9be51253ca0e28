//! Audit history model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Enumerated tag for an audited action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Ban,
    Unban,
    Promote,
    Broadcast,
    Verify,
    Lockdown,
    WelcomeUpdated,
    FilterUpdated,
    Scheduled,
    Export,
    JoinDeclined,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Ban => "ban",
            AuditAction::Unban => "unban",
            AuditAction::Promote => "promote",
            AuditAction::Broadcast => "broadcast",
            AuditAction::Verify => "verify",
            AuditAction::Lockdown => "lockdown",
            AuditAction::WelcomeUpdated => "welcome_updated",
            AuditAction::FilterUpdated => "filter_updated",
            AuditAction::Scheduled => "scheduled",
            AuditAction::Export => "export",
            AuditAction::JoinDeclined => "join_declined",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One append-only audit record; immutable once written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub user_id: i64,
    pub action: AuditAction,
    pub timestamp: DateTime<Utc>,
    pub details: serde_json::Value,
    /// None for system-triggered actions
    pub admin_id: Option<i64>,
}
