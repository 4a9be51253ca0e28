//! Message handlers module
//!
//! Handles incoming text messages, new member events, and join requests.
//! Inbound text fans out to, in order: console wizard input (operators
//! with an awaiting session), moderation middleware (non-privileged group
//! messages), and the meeting-link reformatter.

use chrono::Utc;
use teloxide::{
    Bot,
    prelude::*,
    types::{ChatJoinRequest, ChatPermissions, InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode},
};
use tracing::{debug, error, info, warn};

use crate::handlers::console;
use crate::middleware::reformat::{detect_meeting_link, render_card, ReformatStyle};
use crate::middleware::ModerationAction;
use crate::models::{AuditAction, ObservedUser, PendingJoinRequest};
use crate::services::ServiceFactory;
use crate::services::settings::keys;
use crate::state::{ConsoleEvent, SessionStore};
use crate::utils::errors::Result;

/// Handle incoming text messages
pub async fn handle_message(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };
    if user.is_bot {
        return Ok(());
    }

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    debug!(user_id = user_id, chat_id = ?chat_id, "Processing message");

    // Register the user on first observed interaction. Losing the upsert
    // must not block moderation of the message itself.
    let observed = ObservedUser::from_telegram(&user);
    if let Err(e) = services.database.observe_user(&observed).await {
        warn!(user_id = user_id, error = %e, "Failed to record user");
    }

    let Some(text) = msg.text().map(|t| t.to_string()) else {
        return Ok(());
    };

    // Operators mid-wizard: the text is console input for their session
    if let Some(session) = services.session_store.load(user_id) {
        if session.state.awaits_input() && session.chat_id == chat_id.0 {
            return console::handle_console_event(
                bot,
                user_id,
                chat_id,
                ConsoleEvent::Input(text),
                services,
            )
            .await;
        }
    }

    if chat_id.is_user() {
        // Private chats carry no moderation; nothing further to do
        return Ok(());
    }

    // Moderation runs once per group message from a non-privileged actor
    if !services.auth_service.is_privileged(user_id).await {
        let actions = services.moderation.inspect(user_id, &text, Utc::now()).await;
        if !actions.is_empty() {
            execute_moderation_actions(&bot, &msg, user_id, &actions).await;
            return Ok(());
        }
    }

    if services.config.features.link_reformatter {
        reformat_meeting_link(&bot, &msg, &text, &services).await;
    }

    Ok(())
}

/// Apply moderation decisions, best-effort: the message may already be
/// gone or the bot may lack rights, and neither aborts anything.
async fn execute_moderation_actions(
    bot: &Bot,
    msg: &Message,
    user_id: i64,
    actions: &[ModerationAction],
) {
    for action in actions {
        match action {
            ModerationAction::DeleteMessage => {
                crate::utils::logging::log_moderation_action(user_id, "delete_message", None);
                if let Err(e) = bot.delete_message(msg.chat.id, msg.id).await {
                    debug!(user_id = user_id, error = %e, "Could not delete message");
                }
            }
            ModerationAction::RestrictSender { until } => {
                let request = bot
                    .restrict_chat_member(msg.chat.id, msg.from.as_ref().unwrap().id, ChatPermissions::empty())
                    .until_date(*until);
                if let Err(e) = request.await {
                    debug!(user_id = user_id, error = %e, "Could not restrict member");
                } else {
                    info!(user_id = user_id, until = %until, "Member muted for flooding");
                }
            }
        }
    }
}

/// Detect and re-post meeting links according to the configured style
async fn reformat_meeting_link(bot: &Bot, msg: &Message, text: &str, services: &ServiceFactory) {
    let Some(link) = detect_meeting_link(text) else {
        return;
    };

    let style_key = services
        .settings_service
        .text(keys::REFORMAT_STYLE, ReformatStyle::Professional.as_key())
        .await;
    let style = ReformatStyle::from_key(&style_key);
    if style == ReformatStyle::Off {
        return;
    }

    let template = services
        .settings_service
        .text(keys::REFORMAT_TEMPLATE, "{url}")
        .await;
    let host = msg
        .from
        .as_ref()
        .map(|user| user.full_name())
        .unwrap_or_else(|| "someone".to_string());

    let Some(card) = render_card(style, &link, &host, &template) else {
        return;
    };

    if let Err(e) = bot.delete_message(msg.chat.id, msg.id).await {
        debug!(error = %e, "Could not delete original link message");
    }

    if let Err(e) = bot
        .send_message(msg.chat.id, card)
        .parse_mode(ParseMode::Markdown)
        .await
    {
        warn!(error = %e, "Could not post reformatted link card");
    }
}

/// Handle new chat member events (the join-verification workflow)
pub async fn handle_new_chat_member(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let Some(new_members) = msg.new_chat_members() else {
        return Ok(());
    };

    for member in new_members {
        if member.is_bot {
            continue;
        }

        let user_id = member.id.0 as i64;
        let chat_id = msg.chat.id;
        debug!(user_id = user_id, chat_id = ?chat_id, "New member joined chat");

        let observed = ObservedUser::from_telegram(member);
        if let Err(e) = services.database.observe_user(&observed).await {
            warn!(user_id = user_id, error = %e, "Failed to record new member");
        }

        let challenge_mode = services.config.features.join_verification
            && services.settings_service.flag(keys::CAPTCHA_ENABLED, true).await;

        if challenge_mode {
            // Gate the member behind the human-verification challenge
            if let Err(e) = bot
                .restrict_chat_member(chat_id, member.id, ChatPermissions::empty())
                .await
            {
                error!(user_id = user_id, error = %e, "Failed to restrict new member");
            }

            let request = PendingJoinRequest::for_member(
                user_id,
                chat_id.0,
                serde_json::json!({
                    "full_name": member.full_name(),
                    "username": member.username.clone(),
                }),
            );
            services.database.join_requests.upsert(&request).await?;

            let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
                "🤖 I am human",
                format!("verify:{}", user_id),
            )]]);
            bot.send_message(
                chat_id,
                format!("Welcome {}! Tap the button below to verify and unlock chat.", member.full_name()),
            )
            .reply_markup(keyboard)
            .await?;

            crate::utils::logging::log_verification(user_id, chat_id.0, false);
        } else {
            let welcome = services
                .settings_service
                .text(keys::WELCOME_MESSAGE, "Welcome!")
                .await;
            bot.send_message(chat_id, welcome).await?;
        }
    }

    Ok(())
}

/// Handle incoming chat join requests; declined while lockdown is active
pub async fn handle_chat_join_request(
    bot: Bot,
    request: ChatJoinRequest,
    services: ServiceFactory,
) -> Result<()> {
    let user_id = request.from.id.0 as i64;
    let chat_id = request.chat.id;

    if services.settings_service.flag(keys::LOCKDOWN_MODE, false).await {
        info!(user_id = user_id, chat_id = ?chat_id, "Join request declined under lockdown");

        if let Err(e) = bot.decline_chat_join_request(chat_id, request.from.id).await {
            warn!(user_id = user_id, error = %e, "Failed to decline join request");
            return Ok(());
        }

        services
            .audit_service
            .record(
                user_id,
                AuditAction::JoinDeclined,
                serde_json::json!({ "reason": "lockdown", "chat_id": chat_id.0 }),
                None,
            )
            .await?;
    } else {
        debug!(user_id = user_id, chat_id = ?chat_id, "Join request left for operators");
    }

    Ok(())
}
