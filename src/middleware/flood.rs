//! Flood tracking middleware
//!
//! Per-actor sliding window of recent message timestamps. The tracker is
//! injected behind a trait so the in-memory map can be swapped for a
//! shared store without touching call sites. Windows are not persisted;
//! a restart starts cold.

use std::collections::HashMap;
use std::sync::Mutex;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Per-actor message-rate tracking interface
pub trait SpamTracker: Send + Sync {
    /// Record one message at `now` and return how many messages the actor
    /// has inside the lookback window, including this one.
    fn record(&self, actor_id: i64, now: DateTime<Utc>) -> usize;

    /// Drop an actor's window entirely
    fn forget(&self, actor_id: i64);
}

/// Bounded in-memory sliding-window tracker
pub struct InMemorySpamTracker {
    window: Duration,
    max_actors: usize,
    windows: Mutex<HashMap<i64, Vec<DateTime<Utc>>>>,
}

impl InMemorySpamTracker {
    pub fn new(window: Duration, max_actors: usize) -> Self {
        Self {
            window,
            max_actors,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn tracked_actors(&self) -> usize {
        self.windows.lock().unwrap().len()
    }
}

impl SpamTracker for InMemorySpamTracker {
    fn record(&self, actor_id: i64, now: DateTime<Utc>) -> usize {
        let mut windows = self.windows.lock().unwrap();

        // Bound the map: when full, drop actors whose window is empty,
        // then fall back to clearing the oldest-touched entry.
        if windows.len() >= self.max_actors && !windows.contains_key(&actor_id) {
            let cutoff = now - self.window;
            windows.retain(|_, stamps| stamps.iter().any(|stamp| *stamp > cutoff));
            if windows.len() >= self.max_actors {
                if let Some(oldest) = windows
                    .iter()
                    .min_by_key(|(_, stamps)| stamps.last().copied())
                    .map(|(id, _)| *id)
                {
                    windows.remove(&oldest);
                    debug!(actor_id = oldest, "Spam tracker full, dropped oldest window");
                }
            }
        }

        let stamps = windows.entry(actor_id).or_default();
        let cutoff = now - self.window;
        stamps.retain(|stamp| *stamp > cutoff);
        stamps.push(now);
        stamps.len()
    }

    fn forget(&self, actor_id: i64) {
        self.windows.lock().unwrap().remove(&actor_id);
    }
}

impl std::fmt::Debug for InMemorySpamTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySpamTracker")
            .field("window", &self.window)
            .field("max_actors", &self.max_actors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_inside_window() {
        let tracker = InMemorySpamTracker::new(Duration::seconds(2), 64);
        let base = Utc::now();

        for i in 0..5 {
            let count = tracker.record(1, base + Duration::milliseconds(i * 100));
            assert_eq!(count, (i + 1) as usize);
        }

        // 6th message within one second: the full burst is still in-window
        assert_eq!(tracker.record(1, base + Duration::milliseconds(900)), 6);
    }

    #[test]
    fn test_spaced_messages_never_accumulate() {
        let tracker = InMemorySpamTracker::new(Duration::seconds(2), 64);
        let base = Utc::now();

        // 6 messages spread across 10 seconds with a 2-second window
        for i in 0..6 {
            let count = tracker.record(1, base + Duration::seconds(i * 2 + 1));
            assert!(count <= 2, "count {} exceeded window expectation", count);
        }
    }

    #[test]
    fn test_actors_tracked_independently() {
        let tracker = InMemorySpamTracker::new(Duration::seconds(2), 64);
        let now = Utc::now();

        assert_eq!(tracker.record(1, now), 1);
        assert_eq!(tracker.record(2, now), 1);
        assert_eq!(tracker.record(1, now), 2);
    }

    #[test]
    fn test_forget() {
        let tracker = InMemorySpamTracker::new(Duration::seconds(2), 64);
        let now = Utc::now();

        tracker.record(1, now);
        tracker.forget(1);
        assert_eq!(tracker.record(1, now), 1);
    }

    #[test]
    fn test_bounded_actor_map() {
        let tracker = InMemorySpamTracker::new(Duration::seconds(2), 2);
        let base = Utc::now();

        tracker.record(1, base);
        tracker.record(2, base + Duration::milliseconds(10));
        tracker.record(3, base + Duration::milliseconds(20));

        assert!(tracker.tracked_actors() <= 2);
    }
}
