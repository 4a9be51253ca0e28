//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks:
//! the join-verification challenge and the admin console menus.

use teloxide::{
    Bot,
    prelude::*,
    types::{CallbackQuery, ChatId, ChatPermissions, MaybeInaccessibleMessage},
};
use tracing::{debug, info, warn};

use crate::handlers::console;
use crate::models::AuditAction;
use crate::services::ServiceFactory;
use crate::services::settings::keys;
use crate::state::machine::parse_callback;
use crate::utils::errors::Result;

/// Main callback query dispatcher
pub async fn handle_callback_query(bot: Bot, query: CallbackQuery, services: ServiceFactory) -> Result<()> {
    let user_id = query.from.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    let Some(data) = query.data.clone() else {
        debug!(user_id = user_id, "Callback query without data");
        return Ok(());
    };

    debug!(user_id = user_id, chat_id = ?chat_id, callback_data = %data, "Processing callback query");

    if let Some(target) = data.strip_prefix("verify:") {
        return handle_verify_callback(bot, query, target.parse().ok(), services).await;
    }

    // Answer first to clear the client's loading state
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }

    match parse_callback(&data) {
        Some(event) => console::handle_console_event(bot, user_id, chat_id, event, services).await,
        None => {
            warn!(user_id = user_id, callback_data = %data, "Unknown callback payload");
            Ok(())
        }
    }
}

/// Handle a tap on the join-verification challenge control
async fn handle_verify_callback(
    bot: Bot,
    query: CallbackQuery,
    target: Option<i64>,
    services: ServiceFactory,
) -> Result<()> {
    let activator_id = query.from.id.0 as i64;

    let Some(target_id) = target else {
        warn!(user_id = activator_id, "Malformed verify payload");
        return Ok(());
    };

    // The challenge is addressed to one specific identity; anyone else is
    // rejected without effect.
    if activator_id != target_id {
        if let Err(e) = bot
            .answer_callback_query(query.id.clone())
            .text("This check is not for you!")
            .show_alert(true)
            .await
        {
            warn!(error = %e, "Failed to reject foreign verify tap");
        }
        return Ok(());
    }

    // The pending row enforces lifting the restriction exactly once
    let Some(pending) = services.database.join_requests.find(target_id).await? else {
        if let Err(e) = bot
            .answer_callback_query(query.id.clone())
            .text("Already verified.")
            .await
        {
            debug!(error = %e, "Failed to answer stale verify tap");
        }
        return Ok(());
    };

    if !pending.matches(activator_id) {
        warn!(user_id = activator_id, "Challenge answer mismatch");
        return Ok(());
    }

    let chat_id = ChatId(pending.chat_id);
    let permissions = ChatPermissions::SEND_MESSAGES
        | ChatPermissions::SEND_MEDIA_MESSAGES
        | ChatPermissions::SEND_OTHER_MESSAGES;

    bot.restrict_chat_member(chat_id, query.from.id, permissions).await?;

    // Challenge resolved: destroy the pending row before reporting success
    services.database.join_requests.delete(target_id).await?;
    services.database.mark_approved(target_id).await?;
    services
        .audit_service
        .record(
            target_id,
            AuditAction::Verify,
            serde_json::json!({ "chat_id": pending.chat_id }),
            None,
        )
        .await?;

    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        debug!(error = %e, "Failed to answer verify callback");
    }

    // Remove the challenge prompt, best-effort
    if let Some(MaybeInaccessibleMessage::Regular(message)) = query.message {
        if let Err(e) = bot.delete_message(message.chat.id, message.id).await {
            debug!(error = %e, "Could not delete challenge prompt");
        }
    }

    let welcome = services
        .settings_service
        .text(keys::WELCOME_MESSAGE, "Welcome!")
        .await;
    bot.send_message(chat_id, welcome).await?;

    crate::utils::logging::log_verification(target_id, pending.chat_id, true);
    info!(user_id = target_id, "Member verified and unrestricted");

    Ok(())
}
