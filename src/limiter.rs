// SPDX-FileCopyrightText: 2025 Mustofa Amami <amammustofa@gmail.com>
// SPDX-License-Identifier: MIT

//! Fixed-window rate limiter for the contact endpoint.
//!
//! Counts accepted submissions per client identifier (usually an IP address)
//! within a fixed window. Entries self-heal on access once their window has
//! expired; a periodic cleanup task removes entries for clients that stopped
//! sending, so memory stays bounded.

use crate::config::RateLimitConfig;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request is allowed
    Allowed {
        /// Remaining requests in the current window
        remaining: u32,
        /// Unix milliseconds at which the current window ends
        reset_at_ms: i64,
    },
    /// Request is rate limited
    Limited {
        /// Unix milliseconds at which the current window ends
        reset_at_ms: i64,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }

    /// Unix milliseconds at which the window for this decision ends.
    pub fn reset_at_ms(&self) -> i64 {
        match self {
            RateLimitDecision::Allowed { reset_at_ms, .. } => *reset_at_ms,
            RateLimitDecision::Limited { reset_at_ms } => *reset_at_ms,
        }
    }

    /// Whole seconds until the window ends, suitable for a `Retry-After`
    /// header. Never negative.
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let remaining_ms = self.reset_at_ms().saturating_sub(now_ms);
        if remaining_ms <= 0 {
            0
        } else {
            // Round up so clients never retry inside the closing window.
            ((remaining_ms + 999) / 1000) as u64
        }
    }
}

/// Per-identifier window state.
#[derive(Debug)]
struct RateLimitEntry {
    /// Accepted submissions in the current window, always >= 1
    count: u32,
    /// Unix milliseconds at which the window ends
    reset_at_ms: i64,
}

/// Thread-safe fixed-window rate limiter keyed by an opaque identifier.
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Arc<RwLock<HashMap<String, RateLimitEntry>>>,
    cleanup_handle: Mutex<Option<JoinHandle<()>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
            cleanup_handle: Mutex::new(None),
        }
    }

    /// Check whether a submission from `identifier` is allowed right now.
    ///
    /// Never fails; the decision carries the remaining budget or the time the
    /// window resets. Each allowed call consumes one unit of budget, so the
    /// operation is deliberately not idempotent.
    pub async fn check_limit(&self, identifier: &str) -> RateLimitDecision {
        self.check_limit_at(identifier, Utc::now().timestamp_millis())
            .await
    }

    /// Check with an explicit clock, in Unix milliseconds.
    ///
    /// A window is expired iff `now_ms > reset_at_ms` (strict): a request
    /// arriving at exactly `reset_at_ms` still counts against the old window.
    pub async fn check_limit_at(&self, identifier: &str, now_ms: i64) -> RateLimitDecision {
        // Single write lock over the whole read-check-increment sequence so
        // two in-flight requests cannot both slip under the cap.
        let mut entries = self.entries.write().await;

        match entries.get_mut(identifier) {
            Some(entry) if now_ms <= entry.reset_at_ms => {
                if entry.count < self.config.max_requests {
                    entry.count += 1;
                    let remaining = self.config.max_requests - entry.count;
                    debug!(identifier, remaining, "Submission allowed");
                    RateLimitDecision::Allowed {
                        remaining,
                        reset_at_ms: entry.reset_at_ms,
                    }
                } else {
                    debug!(identifier, reset_at_ms = entry.reset_at_ms, "Rate limit exceeded");
                    RateLimitDecision::Limited {
                        reset_at_ms: entry.reset_at_ms,
                    }
                }
            }
            _ => {
                // First sighting, or the previous window expired: start fresh.
                let reset_at_ms = now_ms + self.config.window_ms();
                entries.insert(
                    identifier.to_string(),
                    RateLimitEntry {
                        count: 1,
                        reset_at_ms,
                    },
                );
                RateLimitDecision::Allowed {
                    remaining: self.config.max_requests - 1,
                    reset_at_ms,
                }
            }
        }
    }

    /// Remove every entry whose window has already expired.
    ///
    /// Advisory housekeeping only: `check_limit` self-heals expired entries
    /// on next access, so skipping cleanup never changes decisions.
    pub async fn cleanup(&self) {
        self.cleanup_at(Utc::now().timestamp_millis()).await;
    }

    /// Cleanup with an explicit clock, in Unix milliseconds.
    pub async fn cleanup_at(&self, now_ms: i64) {
        let mut entries = self.entries.write().await;
        purge_expired(&mut entries, now_ms);
    }

    /// Number of identifiers currently tracked.
    pub async fn tracked_identifiers(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Clear all rate limit state. Intended for test isolation.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Spawn the periodic cleanup task.
    ///
    /// Replaces any previously started task. Stop it with [`shutdown`].
    ///
    /// [`shutdown`]: RateLimiter::shutdown
    pub fn start_cleanup(&self) {
        let entries = Arc::clone(&self.entries);
        let interval = self.config.cleanup_interval();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let now_ms = Utc::now().timestamp_millis();
                let mut entries = entries.write().await;
                purge_expired(&mut entries, now_ms);
            }
        });

        let mut slot = self.cleanup_handle.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = slot.replace(handle) {
            old.abort();
        }
    }

    /// Stop the periodic cleanup task.
    ///
    /// Safe to call repeatedly; `check_limit` keeps working afterwards, the
    /// map just stops being compacted.
    pub fn shutdown(&self) {
        let mut slot = self.cleanup_handle.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = slot.take() {
            handle.abort();
            info!("Rate limiter cleanup task stopped");
        }
    }
}

/// Drop every entry whose window has strictly expired (`now > reset_at_ms`),
/// matching the expiry rule `check_limit` uses.
fn purge_expired(entries: &mut HashMap<String, RateLimitEntry>, now_ms: i64) {
    let before = entries.len();
    entries.retain(|_, entry| now_ms <= entry.reset_at_ms);
    let removed = before - entries.len();
    if removed > 0 {
        debug!(removed, tracked = entries.len(), "Cleaned up expired rate limit entries");
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
