//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub moderation: ModerationConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// The privileged operator; always authorized for the admin console
    pub owner_id: i64,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Moderation middleware configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModerationConfig {
    /// Sliding window lookback for the flood gate, in milliseconds
    pub flood_window_ms: u64,
    /// Messages allowed inside the window before the gate fires
    pub flood_threshold: usize,
    /// How long a flooding member is muted, in seconds
    pub mute_seconds: i64,
    /// Pause between broadcast sends, in milliseconds
    pub broadcast_pace_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub admin_console: bool,
    pub join_verification: bool,
    pub link_reformatter: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("CHATWARDEN").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ChatWardenError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                owner_id: 0,
            },
            database: DatabaseConfig {
                url: "sqlite://data/chatwarden.db".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            moderation: ModerationConfig {
                flood_window_ms: 2_000,
                flood_threshold: 5,
                mute_seconds: 3_600,
                broadcast_pace_ms: 50,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/chatwarden".to_string(),
            },
            features: FeaturesConfig {
                admin_console: true,
                join_verification: true,
                link_reformatter: true,
            },
        }
    }
}
