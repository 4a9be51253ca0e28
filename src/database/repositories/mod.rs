//! Database repositories module
//!
//! One repository per table, mirroring the persistent data model.

pub mod settings;
pub mod user;
pub mod history;
pub mod join_request;

pub use settings::SettingsRepository;
pub use user::UserRepository;
pub use history::HistoryRepository;
pub use join_request::JoinRequestRepository;
