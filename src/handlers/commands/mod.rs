//! Command handlers module
//!
//! Handlers for the bot's slash commands.

use teloxide::{Bot, prelude::*, types::Message};
use tracing::debug;

use crate::handlers::console;
use crate::models::ObservedUser;
use crate::services::ServiceFactory;
use crate::state::{ConsoleEvent, SessionStore};
use crate::utils::errors::Result;

/// Handle /start - register the user and greet them
pub async fn handle_start(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };

    let observed = ObservedUser::from_telegram(&user);
    services.database.observe_user(&observed).await?;

    debug!(user_id = observed.user_id, "Processing /start command");
    bot.send_message(
        msg.chat.id,
        "👋 I am ChatWarden. I keep this community tidy: member verification, moderation, and an admin console (/admin).",
    )
    .await?;

    Ok(())
}

/// Handle /help - show command overview
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(
        msg.chat.id,
        "ChatWarden commands:\n\
         /start - introduction\n\
         /help - this overview\n\
         /admin - open the admin console (operators only)\n\
         /cancel - cancel the current console operation",
    )
    .await?;

    Ok(())
}

/// Handle /admin - open the admin console
pub async fn handle_admin(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    if !services.config.features.admin_console {
        return Ok(());
    }

    console::open_console(bot, user.id.0 as i64, msg.chat.id, services).await
}

/// Handle /cancel - abort the in-progress console wizard
pub async fn handle_cancel(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    if services.session_store.load(user_id).is_none() {
        debug!(user_id = user_id, "Cancel with no active session");
        return Ok(());
    }

    console::handle_console_event(bot, user_id, msg.chat.id, ConsoleEvent::Cancel, services).await
}
