//! Moderation middleware
//!
//! Runs once per inbound group text message from a non-privileged actor.
//! Two independent checks: the flood gate (sliding-window rate limit) and
//! the content filter (settings-backed banned substrings). The middleware
//! only decides; executing the resulting actions against Telegram is the
//! handler's job, best-effort.

use std::sync::Arc;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use crate::config::ModerationConfig;
use crate::services::settings::{keys, SettingsService};
use super::flood::SpamTracker;

/// Action requested against the offending message or its sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
    DeleteMessage,
    RestrictSender { until: DateTime<Utc> },
}

/// Moderation decision middleware
#[derive(Clone)]
pub struct ModerationMiddleware {
    tracker: Arc<dyn SpamTracker>,
    settings: SettingsService,
    threshold: usize,
    mute: Duration,
}

impl ModerationMiddleware {
    pub fn new(
        tracker: Arc<dyn SpamTracker>,
        settings: SettingsService,
        config: &ModerationConfig,
    ) -> Self {
        Self {
            tracker,
            settings,
            threshold: config.flood_threshold,
            mute: Duration::seconds(config.mute_seconds),
        }
    }

    /// Inspect one message and return the actions it triggers.
    ///
    /// Either check, both, or neither may fire; their order is immaterial.
    pub async fn inspect(&self, actor_id: i64, text: &str, now: DateTime<Utc>) -> Vec<ModerationAction> {
        let mut actions = Vec::new();

        // Flood gate: exact counts matter, this is a sliding window
        let count = self.tracker.record(actor_id, now);
        if count > self.threshold {
            info!(user_id = actor_id, count = count, "Flood gate fired");
            actions.push(ModerationAction::DeleteMessage);
            actions.push(ModerationAction::RestrictSender { until: now + self.mute });
        }

        // Content filter: banned substrings, case-insensitive.
        // The list is re-read on every decision; the settings store is the
        // source of truth.
        let banned = self.settings.word_list(keys::AUTO_DECLINE_WORDS).await;
        if !banned.is_empty() {
            let lowered = text.to_lowercase();
            if banned.iter().any(|word| lowered.contains(word.as_str())) {
                info!(user_id = actor_id, "Content filter fired");
                if !actions.contains(&ModerationAction::DeleteMessage) {
                    actions.push(ModerationAction::DeleteMessage);
                }
            }
        }

        if actions.is_empty() {
            debug!(user_id = actor_id, "Message passed moderation");
        }
        actions
    }
}

impl std::fmt::Debug for ModerationMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationMiddleware")
            .field("threshold", &self.threshold)
            .field("mute", &self.mute)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::database::SettingsRepository;
    use crate::middleware::flood::InMemorySpamTracker;
    use crate::services::settings::SettingValue;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_middleware() -> (ModerationMiddleware, SettingsService) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        let settings = SettingsService::new(SettingsRepository::new(pool));

        let config = Settings::default().moderation;
        let tracker = Arc::new(InMemorySpamTracker::new(
            Duration::milliseconds(config.flood_window_ms as i64),
            1024,
        ));

        (
            ModerationMiddleware::new(tracker, settings.clone(), &config),
            settings,
        )
    }

    #[tokio::test]
    async fn test_flood_gate_fires_on_sixth_message() {
        let (middleware, _) = test_middleware().await;
        let base = Utc::now();

        for i in 0..5 {
            let actions = middleware
                .inspect(1, "hello", base + Duration::milliseconds(i * 150))
                .await;
            assert!(actions.is_empty(), "message {} should pass", i + 1);
        }

        let actions = middleware
            .inspect(1, "hello", base + Duration::milliseconds(900))
            .await;
        assert!(actions.contains(&ModerationAction::DeleteMessage));
        assert!(actions
            .iter()
            .any(|a| matches!(a, ModerationAction::RestrictSender { .. })));
    }

    #[tokio::test]
    async fn test_spaced_messages_never_trip_the_gate() {
        let (middleware, _) = test_middleware().await;
        let base = Utc::now();

        for i in 0..6 {
            let actions = middleware
                .inspect(1, "hello", base + Duration::seconds(i * 2 + 1))
                .await;
            assert!(actions.is_empty());
        }
    }

    #[tokio::test]
    async fn test_mute_duration_is_one_hour() {
        let (middleware, _) = test_middleware().await;
        let base = Utc::now();

        for i in 0..6 {
            middleware
                .inspect(1, "hello", base + Duration::milliseconds(i * 10))
                .await;
        }
        let actions = middleware
            .inspect(1, "hello", base + Duration::milliseconds(100))
            .await;
        let until = actions
            .iter()
            .find_map(|a| match a {
                ModerationAction::RestrictSender { until } => Some(*until),
                _ => None,
            })
            .expect("restriction expected");
        assert_eq!(until - (base + Duration::milliseconds(100)), Duration::seconds(3600));
    }

    #[tokio::test]
    async fn test_content_filter_case_insensitive() {
        let (middleware, settings) = test_middleware().await;
        settings
            .set(
                keys::AUTO_DECLINE_WORDS,
                SettingValue::WordList(vec!["spam".to_string()]),
            )
            .await
            .unwrap();

        let actions = middleware.inspect(2, "buy SPAM now", Utc::now()).await;
        assert_eq!(actions, vec![ModerationAction::DeleteMessage]);

        let actions = middleware.inspect(3, "perfectly fine", Utc::now()).await;
        assert!(actions.is_empty());
    }

    #[tokio::test]
    async fn test_both_checks_can_fire_with_single_delete() {
        let (middleware, settings) = test_middleware().await;
        settings
            .set(
                keys::AUTO_DECLINE_WORDS,
                SettingValue::WordList(vec!["spam".to_string()]),
            )
            .await
            .unwrap();

        let base = Utc::now();
        for i in 0..6 {
            middleware
                .inspect(4, "spam", base + Duration::milliseconds(i * 10))
                .await;
        }
        let actions = middleware
            .inspect(4, "spam", base + Duration::milliseconds(100))
            .await;

        let deletes = actions
            .iter()
            .filter(|a| **a == ModerationAction::DeleteMessage)
            .count();
        assert_eq!(deletes, 1);
        assert!(actions
            .iter()
            .any(|a| matches!(a, ModerationAction::RestrictSender { .. })));
    }
}
