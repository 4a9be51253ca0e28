//! Admin console executor
//!
//! Bridges the pure console state machine to the outside world: loads the
//! operator's session, gates every event behind the authorization guard,
//! runs the transition, and carries out the resulting effects against the
//! settings store, audit log, and Telegram.

use teloxide::{
    Bot,
    prelude::*,
    types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputPollOption, Rgb, UserId},
};
use tracing::{debug, info, warn};

use crate::models::AuditAction;
use crate::services::ServiceFactory;
use crate::services::settings::{keys, SettingValue};
use crate::state::{
    machine, AdminSession, ConsoleEvent, Effect, Menu, SessionStore,
};
use crate::middleware::reformat::ReformatStyle;
use crate::utils::errors::Result;

/// Open the console for an operator, replacing any previous session
pub async fn open_console(bot: Bot, actor_id: i64, chat_id: ChatId, services: ServiceFactory) -> Result<()> {
    if !services.auth_service.authorize_console(actor_id).await.is_authorized() {
        bot.send_message(chat_id, "⛔ Access denied: admin only.").await?;
        return Ok(());
    }

    let session = AdminSession::new(actor_id, chat_id.0);
    services.session_store.save(session);
    info!(admin_id = actor_id, chat_id = chat_id.0, "Admin console opened");

    render_menu(&bot, chat_id, Menu::Root).await?;
    Ok(())
}

/// Feed one event into the operator's console session
pub async fn handle_console_event(
    bot: Bot,
    actor_id: i64,
    chat_id: ChatId,
    event: ConsoleEvent,
    services: ServiceFactory,
) -> Result<()> {
    // Every entry point is gated; a denied actor causes no state change,
    // no side effect, and no audit record.
    if !services.auth_service.authorize_console(actor_id).await.is_authorized() {
        bot.send_message(chat_id, "⛔ Access denied: admin only.").await?;
        return Ok(());
    }

    let Some(mut session) = services.session_store.load(actor_id) else {
        debug!(admin_id = actor_id, "Console event without a session");
        bot.send_message(chat_id, "No active console session. Use /admin to open one.")
            .await?;
        return Ok(());
    };

    let result = machine::transition(session.state, &mut session.scratch, event);

    match result.state {
        Some(next) => {
            session.state = next;
            services.session_store.save(session.clone());
        }
        None => {
            services.session_store.remove(actor_id);
        }
    }

    if let Err(e) = apply_effects(&bot, &session, &result.effects, &services).await {
        // The operation failed; the session itself is already in a defined
        // state, so surface the failure and let the dispatcher log it.
        let _ = bot
            .send_message(ChatId(session.chat_id), "⚠️ Operation failed. Nothing was changed.")
            .await;
        return Err(e);
    }

    Ok(())
}

/// Execute the effects produced by one transition, in order
async fn apply_effects(
    bot: &Bot,
    session: &AdminSession,
    effects: &[Effect],
    services: &ServiceFactory,
) -> Result<()> {
    let chat_id = ChatId(session.chat_id);
    let admin_id = session.admin_id;

    for effect in effects {
        match effect {
            Effect::RenderMenu(menu) => {
                render_menu(bot, chat_id, *menu).await?;
            }

            Effect::Prompt(prompt) => {
                bot.send_message(chat_id, prompt.text())
                    .reply_markup(cancel_markup())
                    .await?;
            }

            Effect::Notice(text) => {
                bot.send_message(chat_id, text.clone()).await?;
            }

            Effect::BanUser(user_id) => {
                let added = services.settings_service.add_id(keys::BLACKLIST, *user_id).await?;
                services.database.mark_banned(*user_id).await?;

                // Chat removal is advisory; block-list membership is authoritative
                if let Err(e) = bot.ban_chat_member(chat_id, UserId(*user_id as u64)).await {
                    warn!(user_id = user_id, error = %e, "Ban kick failed, block-list entry kept");
                }

                services
                    .audit_service
                    .record(
                        *user_id,
                        AuditAction::Ban,
                        serde_json::json!({ "already_listed": !added }),
                        Some(admin_id),
                    )
                    .await?;
                crate::utils::logging::log_admin_action(admin_id, "ban", Some(*user_id), None);
                bot.send_message(chat_id, format!("🚫 Banned {}", user_id)).await?;
            }

            Effect::UnbanUser(user_id) => {
                let removed = services.settings_service.remove_id(keys::BLACKLIST, *user_id).await?;
                if removed {
                    services.database.mark_approved(*user_id).await?;
                }

                if let Err(e) = bot.unban_chat_member(chat_id, UserId(*user_id as u64)).await {
                    warn!(user_id = user_id, error = %e, "Chat unban failed");
                }

                services
                    .audit_service
                    .record(
                        *user_id,
                        AuditAction::Unban,
                        serde_json::json!({ "was_listed": removed }),
                        Some(admin_id),
                    )
                    .await?;
                bot.send_message(chat_id, format!("✅ Unbanned {}", user_id)).await?;
            }

            Effect::ViewUser(user_id) => {
                let text = match services.database.users.find(*user_id).await? {
                    Some(user) => format!(
                        "👤 User {}\nName: {}\nUsername: {}\nLanguage: {}\nJoined: {}\nStatus: {}",
                        user.user_id,
                        user.full_name,
                        user.username.as_deref().unwrap_or("—"),
                        user.language.as_deref().unwrap_or("—"),
                        crate::utils::helpers::format_timestamp(user.joined_at),
                        user.status,
                    ),
                    None => format!("👤 User {} is not known to the bot.", user_id),
                };
                bot.send_message(chat_id, text).await?;
            }

            Effect::PromoteUser(user_id) => {
                services.settings_service.add_id(keys::ADMINS, *user_id).await?;
                services
                    .audit_service
                    .record(*user_id, AuditAction::Promote, serde_json::json!({}), Some(admin_id))
                    .await?;
                bot.send_message(chat_id, format!("✅ Promoted {}", user_id)).await?;
            }

            Effect::SendPoll { question, options } => {
                let poll_options: Vec<InputPollOption> = options
                    .iter()
                    .map(|option| InputPollOption::new(option.clone()))
                    .collect();
                if let Err(e) = bot.send_poll(chat_id, question.clone(), poll_options).await {
                    warn!(error = %e, "Poll send failed");
                    bot.send_message(chat_id, "❌ Failed to send the poll.").await?;
                }
            }

            Effect::ScheduleMessage { delay_minutes, text } => {
                let job_id = services.scheduler_service.schedule_message(
                    session.chat_id,
                    text.clone(),
                    std::time::Duration::from_secs(delay_minutes * 60),
                );
                services
                    .audit_service
                    .record(
                        admin_id,
                        AuditAction::Scheduled,
                        serde_json::json!({ "job_id": job_id, "delay_minutes": delay_minutes }),
                        Some(admin_id),
                    )
                    .await?;
                bot.send_message(chat_id, format!("✅ Scheduled in {}m", delay_minutes)).await?;
            }

            Effect::CreateTopic(name) => match bot
                .create_forum_topic(chat_id, name.clone(), Rgb::from_u32(0x6FB9F0), String::new())
                .await
            {
                Ok(_) => {
                    bot.send_message(chat_id, format!("✅ Topic created: {}", name)).await?;
                }
                Err(e) => {
                    warn!(error = %e, "Topic creation failed");
                    bot.send_message(chat_id, "❌ Failed to create the topic.").await?;
                }
            },

            Effect::SetWelcome(text) => {
                services
                    .settings_service
                    .set(keys::WELCOME_MESSAGE, SettingValue::Text(text.clone()))
                    .await?;
                services
                    .audit_service
                    .record(admin_id, AuditAction::WelcomeUpdated, serde_json::json!({}), Some(admin_id))
                    .await?;
                bot.send_message(chat_id, "✅ Welcome message updated.").await?;
            }

            Effect::ToggleFilterWord(word) => {
                let added = services
                    .settings_service
                    .toggle_word(keys::AUTO_DECLINE_WORDS, word)
                    .await?;
                services
                    .audit_service
                    .record(
                        admin_id,
                        AuditAction::FilterUpdated,
                        serde_json::json!({ "word": word, "added": added }),
                        Some(admin_id),
                    )
                    .await?;
                let text = if added {
                    format!("➕ Added '{}'", word)
                } else {
                    format!("🗑️ Removed '{}'", word)
                };
                bot.send_message(chat_id, text).await?;
            }

            Effect::Broadcast(text) => {
                bot.send_message(chat_id, "📢 Broadcasting...").await?;
                let report = services.broadcast_service.run(text).await?;
                services
                    .audit_service
                    .record(
                        admin_id,
                        AuditAction::Broadcast,
                        serde_json::json!({ "sent": report.sent, "failed": report.failed }),
                        Some(admin_id),
                    )
                    .await?;
                bot.send_message(chat_id, report.summary()).await?;
            }

            Effect::ToggleLockdown => {
                let enabled = services
                    .settings_service
                    .toggle_flag(keys::LOCKDOWN_MODE, false)
                    .await?;
                services
                    .audit_service
                    .record(
                        admin_id,
                        AuditAction::Lockdown,
                        serde_json::json!({ "enabled": enabled }),
                        Some(admin_id),
                    )
                    .await?;
                let text = if enabled {
                    "🔒 Lockdown ENABLED: new join requests are paused."
                } else {
                    "🔓 Lockdown DISABLED."
                };
                bot.send_message(chat_id, text).await?;
            }

            Effect::SetReformatStyle(style) => {
                let style = ReformatStyle::from_key(style);
                services
                    .settings_service
                    .set(keys::REFORMAT_STYLE, SettingValue::Text(style.as_key().to_string()))
                    .await?;
                bot.send_message(chat_id, format!("✅ Link card style set to: {}", style.as_key()))
                    .await?;
            }

            Effect::ExportUsers => {
                let document = services.export_service.users_csv().await?;
                let rows = document.rows;
                let file = InputFile::memory(document.bytes).file_name(document.filename);
                match bot.send_document(chat_id, file).await {
                    Ok(_) => {
                        services
                            .audit_service
                            .record(
                                admin_id,
                                AuditAction::Export,
                                serde_json::json!({ "rows": rows }),
                                Some(admin_id),
                            )
                            .await?;
                    }
                    Err(e) => {
                        warn!(error = %e, "Export upload failed");
                        bot.send_message(chat_id, "❌ Failed to send the export.").await?;
                    }
                }
            }

            Effect::CloseConsole => {
                bot.send_message(chat_id, "Console closed.").await?;
                info!(admin_id = admin_id, "Admin console closed");
            }
        }
    }

    Ok(())
}

/// Render a menu as an inline keyboard
async fn render_menu(bot: &Bot, chat_id: ChatId, menu: Menu) -> Result<()> {
    bot.send_message(chat_id, format!("🛡️ {}", menu.title()))
        .reply_markup(menu_markup(menu))
        .await?;
    Ok(())
}

fn menu_markup(menu: Menu) -> InlineKeyboardMarkup {
    let buttons: Vec<InlineKeyboardButton> = menu
        .entries()
        .into_iter()
        .map(|(label, payload)| InlineKeyboardButton::callback(label, payload))
        .collect();

    let rows: Vec<Vec<InlineKeyboardButton>> =
        buttons.chunks(2).map(|chunk| chunk.to_vec()).collect();

    InlineKeyboardMarkup::new(rows)
}

fn cancel_markup() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "❌ Cancel",
        "admin:cancel",
    )]])
}
