//! Authorization service implementation
//!
//! Explicit guard for the admin console: every entry point calls
//! [`AuthService::authorize_console`] and branches on the tagged result.
//! A denied actor gets no side effect and no audit noise.

use tracing::{debug, warn};
use crate::config::Settings;
use crate::services::settings::{keys, SettingsService};

/// Tagged authorization outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    Authorized,
    Denied,
}

impl AuthDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthDecision::Authorized)
    }
}

/// Authorization service for console access control
#[derive(Debug, Clone)]
pub struct AuthService {
    owner_id: i64,
    settings: SettingsService,
}

impl AuthService {
    pub fn new(config: &Settings, settings: SettingsService) -> Self {
        Self {
            owner_id: config.bot.owner_id,
            settings,
        }
    }

    /// Decide whether an actor may use the admin console.
    ///
    /// The configured owner is always authorized; other actors must appear
    /// in the settings-backed admin id list. The list is re-read on every
    /// decision so a promotion takes effect immediately.
    pub async fn authorize_console(&self, actor_id: i64) -> AuthDecision {
        if actor_id == self.owner_id {
            debug!(user_id = actor_id, "Console access: owner");
            return AuthDecision::Authorized;
        }

        let admins = self.settings.id_list(keys::ADMINS).await;
        if admins.contains(&actor_id) {
            debug!(user_id = actor_id, "Console access: listed admin");
            AuthDecision::Authorized
        } else {
            warn!(user_id = actor_id, "Unauthorized console access attempt");
            AuthDecision::Denied
        }
    }

    /// Check whether an actor is exempt from moderation
    pub async fn is_privileged(&self, actor_id: i64) -> bool {
        self.authorize_console(actor_id).await.is_authorized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::SettingsRepository;
    use crate::services::settings::SettingValue;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_auth(owner_id: i64) -> (AuthService, SettingsService) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        let settings = SettingsService::new(SettingsRepository::new(pool));

        let mut config = Settings::default();
        config.bot.owner_id = owner_id;

        (AuthService::new(&config, settings.clone()), settings)
    }

    #[tokio::test]
    async fn test_owner_always_authorized() {
        let (auth, _) = test_auth(42).await;
        assert_eq!(auth.authorize_console(42).await, AuthDecision::Authorized);
    }

    #[tokio::test]
    async fn test_stranger_denied() {
        let (auth, _) = test_auth(42).await;
        assert_eq!(auth.authorize_console(99).await, AuthDecision::Denied);
    }

    #[tokio::test]
    async fn test_promoted_admin_authorized() {
        let (auth, settings) = test_auth(42).await;
        assert_eq!(auth.authorize_console(7).await, AuthDecision::Denied);

        settings
            .set(keys::ADMINS, SettingValue::IdList(vec![7]))
            .await
            .unwrap();
        assert_eq!(auth.authorize_console(7).await, AuthDecision::Authorized);
    }
}
