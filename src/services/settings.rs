//! Settings service implementation
//!
//! Durable key/value configuration with typed defaults. Every stored value
//! belongs to a small closed set of schemas validated at this boundary;
//! reads never fail visibly (a missing key or corrupt stored value both
//! resolve to the caller-supplied default), writes are durable upserts with
//! last-write-wins semantics.

use serde_json::Value;
use tracing::{debug, warn};
use crate::database::SettingsRepository;
use crate::utils::errors::{ChatWardenError, Result};

/// Well-known settings keys
pub mod keys {
    pub const WELCOME_MESSAGE: &str = "welcome_message";
    pub const CAPTCHA_ENABLED: &str = "captcha_enabled";
    pub const LOCKDOWN_MODE: &str = "lockdown_mode";
    pub const BLACKLIST: &str = "blacklist";
    pub const ADMINS: &str = "admins";
    pub const AUTO_DECLINE_WORDS: &str = "auto_decline_words";
    pub const REFORMAT_STYLE: &str = "reformat_style";
    pub const REFORMAT_TEMPLATE: &str = "reformat_template";
}

/// The closed set of value schemas a setting may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Text,
    Flag,
    IdList,
    WordList,
}

/// A typed setting value
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Text(String),
    Flag(bool),
    IdList(Vec<i64>),
    WordList(Vec<String>),
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Text(_) => SettingKind::Text,
            SettingValue::Flag(_) => SettingKind::Flag,
            SettingValue::IdList(_) => SettingKind::IdList,
            SettingValue::WordList(_) => SettingKind::WordList,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            SettingValue::Text(s) => Value::String(s.clone()),
            SettingValue::Flag(b) => Value::Bool(*b),
            SettingValue::IdList(ids) => Value::Array(ids.iter().map(|id| Value::from(*id)).collect()),
            SettingValue::WordList(words) => {
                Value::Array(words.iter().map(|w| Value::String(w.clone())).collect())
            }
        }
    }

    fn from_json(value: &Value, kind: SettingKind) -> Option<Self> {
        match kind {
            SettingKind::Text => value.as_str().map(|s| SettingValue::Text(s.to_string())),
            SettingKind::Flag => value.as_bool().map(SettingValue::Flag),
            SettingKind::IdList => value.as_array().and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_i64())
                    .collect::<Option<Vec<i64>>>()
                    .map(SettingValue::IdList)
            }),
            SettingKind::WordList => value.as_array().and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(|s| s.to_string()))
                    .collect::<Option<Vec<String>>>()
                    .map(SettingValue::WordList)
            }),
        }
    }
}

/// Schema lookup for the closed key set
pub fn schema_of(key: &str) -> Option<SettingKind> {
    match key {
        keys::WELCOME_MESSAGE | keys::REFORMAT_STYLE | keys::REFORMAT_TEMPLATE => {
            Some(SettingKind::Text)
        }
        keys::CAPTCHA_ENABLED | keys::LOCKDOWN_MODE => Some(SettingKind::Flag),
        keys::BLACKLIST | keys::ADMINS => Some(SettingKind::IdList),
        keys::AUTO_DECLINE_WORDS => Some(SettingKind::WordList),
        _ => None,
    }
}

/// Typed settings store backed by the settings repository
#[derive(Debug, Clone)]
pub struct SettingsService {
    repository: SettingsRepository,
}

impl SettingsService {
    pub fn new(repository: SettingsRepository) -> Self {
        Self { repository }
    }

    /// Read a value with its expected kind; any failure resolves to None
    async fn read(&self, key: &str, kind: SettingKind) -> Option<SettingValue> {
        let raw = match self.repository.fetch(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key = key, error = %e, "Settings read failed, using default");
                return None;
            }
        };

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = key, error = %e, "Corrupt setting value, using default");
                return None;
            }
        };

        let value = SettingValue::from_json(&parsed, kind);
        if value.is_none() {
            warn!(key = key, "Setting value has wrong shape, using default");
        }
        value
    }

    /// Durably store a value; the write is committed before returning
    pub async fn set(&self, key: &str, value: SettingValue) -> Result<()> {
        let expected = schema_of(key)
            .ok_or_else(|| ChatWardenError::InvalidInput(format!("Unknown setting key: {}", key)))?;

        if value.kind() != expected {
            return Err(ChatWardenError::InvalidInput(format!(
                "Setting {} expects {:?}, got {:?}",
                key,
                expected,
                value.kind()
            )));
        }

        let raw = serde_json::to_string(&value.to_json())?;
        self.repository.upsert(key, &raw).await?;
        debug!(key = key, "Setting stored");
        Ok(())
    }

    /// Get a text setting, falling back to the supplied default
    pub async fn text(&self, key: &str, default: &str) -> String {
        match self.read(key, SettingKind::Text).await {
            Some(SettingValue::Text(s)) => s,
            _ => default.to_string(),
        }
    }

    /// Get a boolean setting, falling back to the supplied default
    pub async fn flag(&self, key: &str, default: bool) -> bool {
        match self.read(key, SettingKind::Flag).await {
            Some(SettingValue::Flag(b)) => b,
            _ => default,
        }
    }

    /// Get an id-list setting; missing resolves to empty
    pub async fn id_list(&self, key: &str) -> Vec<i64> {
        match self.read(key, SettingKind::IdList).await {
            Some(SettingValue::IdList(ids)) => ids,
            _ => Vec::new(),
        }
    }

    /// Get a word-list setting; missing resolves to empty
    pub async fn word_list(&self, key: &str) -> Vec<String> {
        match self.read(key, SettingKind::WordList).await {
            Some(SettingValue::WordList(words)) => words,
            _ => Vec::new(),
        }
    }

    /// Add an id to a list setting if absent; returns true when added
    pub async fn add_id(&self, key: &str, id: i64) -> Result<bool> {
        let mut ids = self.id_list(key).await;
        if ids.contains(&id) {
            return Ok(false);
        }
        ids.push(id);
        self.set(key, SettingValue::IdList(ids)).await?;
        Ok(true)
    }

    /// Remove an id from a list setting; returns true when removed
    pub async fn remove_id(&self, key: &str, id: i64) -> Result<bool> {
        let mut ids = self.id_list(key).await;
        let before = ids.len();
        ids.retain(|existing| *existing != id);
        if ids.len() == before {
            return Ok(false);
        }
        self.set(key, SettingValue::IdList(ids)).await?;
        Ok(true)
    }

    /// Toggle a word in a word-list setting; returns true when the word was added
    pub async fn toggle_word(&self, key: &str, word: &str) -> Result<bool> {
        let word = word.to_lowercase();
        let mut words = self.word_list(key).await;
        let added = if let Some(pos) = words.iter().position(|existing| *existing == word) {
            words.remove(pos);
            false
        } else {
            words.push(word);
            true
        };
        self.set(key, SettingValue::WordList(words)).await?;
        Ok(added)
    }

    /// Flip a flag setting; returns the new value
    pub async fn toggle_flag(&self, key: &str, default: bool) -> Result<bool> {
        let current = self.flag(key, default).await;
        self.set(key, SettingValue::Flag(!current)).await?;
        Ok(!current)
    }

    /// Seed defaults for keys that must always resolve
    pub async fn seed_defaults(&self) -> Result<()> {
        if self.repository.fetch(keys::WELCOME_MESSAGE).await?.is_none() {
            self.set(
                keys::WELCOME_MESSAGE,
                SettingValue::Text("Welcome! Please read the rules.".to_string()),
            )
            .await?;
        }
        Ok(())
    }
}
