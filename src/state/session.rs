//! Admin console session state
//!
//! One transient session per operator: the current console state plus
//! free-form scratch data collected by in-progress wizards. Sessions are
//! created on console entry and destroyed on completion, cancellation, or
//! expiry.

use std::collections::HashMap;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed menu hierarchy of the admin console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Menu {
    Root,
    Users,
    Engagement,
    Config,
    Security,
}

impl Menu {
    pub fn title(&self) -> &'static str {
        match self {
            Menu::Root => "Admin Console",
            Menu::Users => "User Management",
            Menu::Engagement => "Engagement",
            Menu::Config => "Group Config",
            Menu::Security => "Security",
        }
    }

    /// Selectable actions for this menu as (label, callback payload) pairs.
    ///
    /// Rendering is a pure function of the menu name; navigation needs no
    /// other state.
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            Menu::Root => vec![
                ("👥 User Management", "menu:users"),
                ("📢 Engagement", "menu:engagement"),
                ("🔧 Group Config", "menu:config"),
                ("🛡️ Security", "menu:security"),
                ("❌ Close Console", "admin:close"),
            ],
            Menu::Users => vec![
                ("🔨 Ban User", "action:ban"),
                ("🏳️ Unban User", "action:unban"),
                ("🔍 View User", "action:view"),
                ("👮 Promote Admin", "action:promote"),
                ("📥 Export Users (CSV)", "action:export"),
                ("🔙 Back", "menu:root"),
            ],
            Menu::Engagement => vec![
                ("📊 Create Poll", "action:poll"),
                ("📂 New Topic", "action:topic"),
                ("👋 Edit Welcome", "action:welcome"),
                ("⏳ Schedule Msg", "action:schedule"),
                ("📢 Broadcast All", "action:broadcast"),
                ("🔙 Back", "menu:root"),
            ],
            Menu::Config => vec![
                ("👔 Link Card: Professional", "reformat:professional"),
                ("🦊 Link Card: Mascot", "reformat:mascot"),
                ("⚡ Link Card: Minimal", "reformat:minimal"),
                ("🔴 Link Card: Off", "reformat:off"),
                ("🔙 Back", "menu:root"),
            ],
            Menu::Security => vec![
                ("🔒 Toggle Lockdown", "action:lockdown"),
                ("🤬 Bad Words Filter", "action:filter"),
                ("🔙 Back", "menu:root"),
            ],
        }
    }
}

/// Explicit enumerated console state: browsing a menu, or awaiting one
/// specific wizard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsoleState {
    Menu(Menu),
    AwaitingBanTarget,
    AwaitingUnbanTarget,
    AwaitingViewTarget,
    AwaitingPromoteTarget,
    AwaitingPollQuestion,
    AwaitingPollOptions,
    AwaitingBroadcastText,
    AwaitingScheduleDelay,
    AwaitingScheduleText,
    AwaitingTopicName,
    AwaitingWelcomeText,
    AwaitingFilterWord,
}

impl ConsoleState {
    /// Whether the console is waiting for free-text operator input
    pub fn awaits_input(&self) -> bool {
        !matches!(self, ConsoleState::Menu(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConsoleState::Menu(_) => "menu",
            ConsoleState::AwaitingBanTarget => "awaiting_ban_target",
            ConsoleState::AwaitingUnbanTarget => "awaiting_unban_target",
            ConsoleState::AwaitingViewTarget => "awaiting_view_target",
            ConsoleState::AwaitingPromoteTarget => "awaiting_promote_target",
            ConsoleState::AwaitingPollQuestion => "awaiting_poll_question",
            ConsoleState::AwaitingPollOptions => "awaiting_poll_options",
            ConsoleState::AwaitingBroadcastText => "awaiting_broadcast_text",
            ConsoleState::AwaitingScheduleDelay => "awaiting_schedule_delay",
            ConsoleState::AwaitingScheduleText => "awaiting_schedule_text",
            ConsoleState::AwaitingTopicName => "awaiting_topic_name",
            ConsoleState::AwaitingWelcomeText => "awaiting_welcome_text",
            ConsoleState::AwaitingFilterWord => "awaiting_filter_word",
        }
    }
}

/// Scratch data collected by an in-progress wizard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scratch {
    data: HashMap<String, serde_json::Value>,
}

impl Scratch {
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) {
        if let Ok(json) = serde_json::to_value(value) {
            self.data.insert(key.to_string(), json);
        }
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.data.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.data.get(key).and_then(|v| v.as_u64())
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One operator's console session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSession {
    pub admin_id: i64,
    /// Chat the console was opened in; wizard effects target this chat
    pub chat_id: i64,
    pub state: ConsoleState,
    pub scratch: Scratch,
    pub opened_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdminSession {
    pub fn new(admin_id: i64, chat_id: i64) -> Self {
        let now = Utc::now();
        Self {
            admin_id,
            chat_id,
            state: ConsoleState::Menu(Menu::Root),
            scratch: Scratch::default(),
            opened_at: now,
            updated_at: now,
        }
    }

    /// Refresh the inactivity clock
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Whether the session has been idle longer than `ttl`
    pub fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now() - self.updated_at > ttl
    }
}
