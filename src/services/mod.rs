//! Services module
//!
//! This module contains business logic services

pub mod audit;
pub mod auth;
pub mod broadcast;
pub mod export;
pub mod scheduler;
pub mod settings;

// Re-export commonly used services
pub use audit::AuditService;
pub use auth::{AuthDecision, AuthService};
pub use broadcast::{BroadcastReport, BroadcastService};
pub use export::{ExportService, ExportedDocument};
pub use scheduler::SchedulerService;
pub use settings::{SettingKind, SettingValue, SettingsService};

use std::sync::Arc;
use std::time::Duration;
use teloxide::Bot;
use crate::config::Settings;
use crate::database::DatabaseService;
use crate::middleware::{InMemorySpamTracker, ModerationMiddleware};
use crate::state::InMemorySessionStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub config: Settings,
    pub database: DatabaseService,
    pub settings_service: SettingsService,
    pub audit_service: AuditService,
    pub auth_service: AuthService,
    pub broadcast_service: BroadcastService,
    pub scheduler_service: SchedulerService,
    pub export_service: ExportService,
    pub moderation: ModerationMiddleware,
    pub session_store: Arc<InMemorySessionStore>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(bot: Bot, config: Settings, database: DatabaseService) -> Result<Self> {
        let settings_service = SettingsService::new(database.settings.clone());
        let audit_service = AuditService::new(database.history.clone());
        let auth_service = AuthService::new(&config, settings_service.clone());
        let broadcast_service = BroadcastService::new(
            bot.clone(),
            database.users.clone(),
            Duration::from_millis(config.moderation.broadcast_pace_ms),
        );
        let scheduler_service = SchedulerService::new(bot);
        let export_service = ExportService::new(database.users.clone());

        let tracker = Arc::new(InMemorySpamTracker::new(
            chrono::Duration::milliseconds(config.moderation.flood_window_ms as i64),
            4096,
        ));
        let moderation =
            ModerationMiddleware::new(tracker, settings_service.clone(), &config.moderation);

        let session_store = InMemorySessionStore::shared();

        Ok(Self {
            config,
            database,
            settings_service,
            audit_service,
            auth_service,
            broadcast_service,
            scheduler_service,
            export_service,
            moderation,
            session_store,
        })
    }
}
