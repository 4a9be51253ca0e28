//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for text messages, member events, and join requests
//! - The console executor bridging the state machine to Telegram

pub mod commands;
pub mod callbacks;
pub mod console;
pub mod messages;

pub use callbacks::handle_callback_query;
pub use messages::{handle_chat_join_request, handle_message, handle_new_chat_member};
