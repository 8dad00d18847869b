// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Sliding-window rate limiter keyed by form.
//!
//! Each key keeps the instants of its accepted attempts. Entries older than
//! the window are dropped when the key is checked; nothing is evicted in the
//! background. Rejected attempts are never recorded.

use crate::clock::{Clock, SystemClock};
use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Rate-limit key of the contact form.
pub const CONTACT_FORM_KEY: &str = "contactForm";

/// Rate-limit key of the newsletter signup.
pub const NEWSLETTER_KEY: &str = "newsletter";

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Attempt recorded
    Allowed {
        /// Attempts left in the current window
        remaining: u32,
        /// Time until the oldest recorded attempt leaves the window
        reset_in: Duration,
    },
    /// Attempt rejected and not recorded
    Limited {
        /// Time until an attempt will be accepted again
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }
}

/// Per-key sliding-window rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    clock: Arc<dyn Clock>,
    attempts: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    /// Create a limiter reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Create a limiter reading the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            attempts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Check and record an attempt for `key` under `limit`.
    pub async fn check(&self, key: &str, limit: &RateLimitConfig) -> RateLimitResult {
        let now = self.clock.now();
        let window = limit.window();

        let mut attempts = self.attempts.write().await;
        let times = attempts.entry(key.to_string()).or_default();
        times.retain(|t| now.saturating_duration_since(*t) < window);

        let count = times.len();
        if count >= limit.max_attempts as usize {
            // An empty window with max_attempts == 0 never opens
            let retry_after = times
                .first()
                .map(|oldest| window.saturating_sub(now.saturating_duration_since(*oldest)))
                .unwrap_or(window);
            debug!(key, count, ?retry_after, "Rate limit exceeded");
            return RateLimitResult::Limited { retry_after };
        }

        times.push(now);
        let oldest = times.first().copied().unwrap_or(now);
        let reset_in = window.saturating_sub(now.saturating_duration_since(oldest));
        let remaining = limit.max_attempts - times.len() as u32;
        debug!(key, remaining, "Attempt recorded");

        RateLimitResult::Allowed { remaining, reset_in }
    }

    /// Boolean form of [`check`](Self::check) taking the limit inline.
    pub async fn is_allowed(&self, key: &str, max_attempts: u32, window: Duration) -> bool {
        let limit = RateLimitConfig::new(max_attempts, window.as_millis() as u64);
        self.check(key, &limit).await.is_allowed()
    }

    /// Number of attempts currently stored for `key`, as of its last check.
    pub async fn attempt_count(&self, key: &str) -> usize {
        self.attempts
            .read()
            .await
            .get(key)
            .map_or(0, Vec::len)
    }
}
