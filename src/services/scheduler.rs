//! Scheduler service implementation
//!
//! A generic "run X at time T" primitive: one-shot deferred sends are
//! detached tokio tasks. At-most-once, best-effort; a failed send is
//! logged and dropped.

use std::time::Duration;
use teloxide::{Bot, prelude::Requester, types::ChatId};
use tracing::{error, info};
use crate::utils::helpers::generate_uuid;

#[derive(Debug, Clone)]
pub struct SchedulerService {
    bot: Bot,
}

impl SchedulerService {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Register a one-shot deferred message send; returns the job id
    pub fn schedule_message(&self, chat_id: i64, text: String, delay: Duration) -> String {
        let job_id = generate_uuid();
        let bot = self.bot.clone();

        info!(job_id = %job_id, chat_id = chat_id, delay_secs = delay.as_secs(), "Message scheduled");

        tokio::spawn({
            let job_id = job_id.clone();
            async move {
                tokio::time::sleep(delay).await;
                match bot.send_message(ChatId(chat_id), &text).await {
                    Ok(_) => info!(job_id = %job_id, chat_id = chat_id, "Scheduled message delivered"),
                    Err(e) => error!(job_id = %job_id, chat_id = chat_id, error = %e, "Scheduled send failed"),
                }
            }
        });

        job_id
    }
}
