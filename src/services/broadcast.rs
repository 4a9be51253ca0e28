//! Broadcast service implementation
//!
//! Sends one message per known user with a fixed pacing delay between
//! sends. Pacing is a throttle for the platform rate limits, not a
//! correctness mechanism; per-recipient failures are counted and never
//! abort the run.

use std::time::{Duration, Instant};
use teloxide::{Bot, prelude::Requester, types::ChatId};
use tracing::{debug, info, warn};
use crate::database::UserRepository;
use crate::utils::errors::Result;

/// Outcome of one broadcast run
#[derive(Debug, Clone)]
pub struct BroadcastReport {
    pub attempted: usize,
    pub sent: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl BroadcastReport {
    pub fn summary(&self) -> String {
        format!(
            "Broadcast done. Sent: {} Failed: {} Time: {:.1}s",
            self.sent,
            self.failed,
            self.elapsed.as_secs_f64()
        )
    }
}

#[derive(Clone)]
pub struct BroadcastService {
    bot: Bot,
    users: UserRepository,
    pace: Duration,
}

impl BroadcastService {
    pub fn new(bot: Bot, users: UserRepository, pace: Duration) -> Self {
        Self { bot, users, pace }
    }

    /// Send `text` to every known user id
    pub async fn run(&self, text: &str) -> Result<BroadcastReport> {
        let recipients = self.users.list_ids().await?;
        let started = Instant::now();
        let mut sent = 0usize;
        let mut failed = 0usize;

        info!(recipients = recipients.len(), "Starting broadcast");

        for user_id in &recipients {
            match self.bot.send_message(ChatId(*user_id), text).await {
                Ok(_) => {
                    sent += 1;
                    debug!(user_id = user_id, "Broadcast message delivered");
                }
                Err(e) => {
                    failed += 1;
                    warn!(user_id = user_id, error = %e, "Broadcast send failed");
                }
            }
            tokio::time::sleep(self.pace).await;
        }

        let report = BroadcastReport {
            attempted: recipients.len(),
            sent,
            failed,
            elapsed: started.elapsed(),
        };

        info!(
            attempted = report.attempted,
            sent = report.sent,
            failed = report.failed,
            "Broadcast finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_summary() {
        let report = BroadcastReport {
            attempted: 10,
            sent: 8,
            failed: 2,
            elapsed: Duration::from_millis(1500),
        };
        let summary = report.summary();
        assert!(summary.contains("Sent: 8"));
        assert!(summary.contains("Failed: 2"));
    }
}
