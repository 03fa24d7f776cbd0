//! Fixed-window rate limiting for the login endpoint.
//!
//! Tracks attempts per client key within a fixed window. State is
//! process-local and never persisted; an entry resets lazily on the next
//! check after its window has elapsed, and only then.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Configuration for the login rate limiter.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted attempts per key within one window.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Window length in seconds.
    #[serde(default = "default_window_secs")]
    pub window_secs: i64,
}

fn default_max_attempts() -> u32 {
    5
}

fn default_window_secs() -> i64 {
    900
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            window_secs: default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    fn window(&self) -> Duration {
        Duration::seconds(self.window_secs)
    }
}

/// Attempt tracking for a single client key.
#[derive(Debug, Clone)]
struct AttemptWindow {
    count: u32,
    window_start: DateTime<Utc>,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmitDecision {
    Admitted,
    Denied {
        retry_after_secs: i64,
        attempts: u32,
    },
}

/// Fixed-window login rate limiter.
///
/// The mutex serializes concurrent checks so two requests arriving at
/// `count == max_attempts - 1` cannot both be admitted past the threshold.
pub struct LoginRateLimiter {
    config: RateLimitConfig,
    entries: Mutex<HashMap<String, AttemptWindow>>,
}

impl LoginRateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Decide whether an attempt from `key` at `now` is admitted.
    ///
    /// `now` is supplied by the caller so tests can drive a simulated
    /// clock. A denied attempt does not increment the counter.
    pub fn admit(&self, key: &str, now: DateTime<Utc>) -> AdmitDecision {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(key.to_string()).or_insert(AttemptWindow {
            count: 0,
            window_start: now,
        });

        if now - entry.window_start > self.config.window() {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.config.max_attempts {
            let remaining = entry.window_start + self.config.window() - now;
            let retry_after_secs = ((remaining.num_milliseconds() + 999) / 1000).max(1);
            return AdmitDecision::Denied {
                retry_after_secs,
                attempts: entry.count,
            };
        }

        entry.count += 1;
        AdmitDecision::Admitted
    }
}
