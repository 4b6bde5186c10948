// ABOUTME: Sliding-window rate limiter for tool invocations.
// ABOUTME: Counts calls per tool id within a rolling time window.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Sliding-window call counter, keyed by tool id.
///
/// Admission is "at most N calls per rolling W window". The
/// prune-check-append sequence for an id is one atomic unit; a single
/// mutex guards all ids.
#[derive(Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether a call to `tool_id` is allowed, recording it if so.
    ///
    /// A `None` limit always allows the call without recording it.
    pub async fn allow(&self, tool_id: &str, limit: Option<u32>, window: Duration) -> bool {
        let Some(limit) = limit else {
            return true;
        };

        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        let calls = windows.entry(tool_id.to_string()).or_default();

        calls.retain(|t| now.duration_since(*t) < window);

        if (calls.len() as u32) < limit {
            calls.push(now);
            true
        } else {
            false
        }
    }

    /// Number of calls currently recorded for a tool id (for monitoring).
    pub async fn recorded(&self, tool_id: &str) -> usize {
        let windows = self.windows.lock().await;
        windows.get(tool_id).map_or(0, Vec::len)
    }
}
