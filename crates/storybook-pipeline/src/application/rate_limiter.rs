//! Per-client admission control.
//!
//! A fixed window per client key: the first request opens a window, and the
//! count resets once `now - window_start >= window`. Records are overwritten
//! when their window lapses and are never removed.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use storybook_core::clock::Clock;

/// Window used when none is configured.
pub const DEFAULT_WINDOW_SECS: u32 = 15 * 60;

/// Quota used when none is configured.
pub const DEFAULT_MAX_REQUESTS: u32 = 100;

/// Quota and window length applied to every client key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    max_requests: NonZeroU32,
    window: TimeDelta,
}

impl RateLimitPolicy {
    /// Creates a policy admitting `max_requests` per `window_secs`.
    #[must_use]
    pub fn new(max_requests: NonZeroU32, window_secs: NonZeroU32) -> Self {
        Self {
            max_requests,
            window: TimeDelta::seconds(i64::from(window_secs.get())),
        }
    }

    /// Maximum admitted requests per window.
    #[must_use]
    pub fn max_requests(&self) -> u32 {
        self.max_requests.get()
    }

    /// Window length.
    #[must_use]
    pub fn window(&self) -> TimeDelta {
        self.window
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::new(
            NonZeroU32::new(DEFAULT_MAX_REQUESTS).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(DEFAULT_WINDOW_SECS).unwrap_or(NonZeroU32::MIN),
        )
    }
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request may proceed.
    Allowed {
        /// Requests left in the current window.
        remaining: u32,
    },
    /// The quota for the current window is spent.
    Rejected {
        /// Whole seconds until the window resets, at least 1.
        retry_after_secs: u64,
    },
}

#[derive(Debug, Clone, Copy)]
struct RateLimitRecord {
    count: u32,
    window_start: DateTime<Utc>,
}

/// Fixed-window rate limiter keyed by client identity.
pub struct RateLimiter {
    policy: RateLimitPolicy,
    clock: Arc<dyn Clock>,
    records: Mutex<HashMap<String, RateLimitRecord>>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RateLimiter {
    /// Creates an empty limiter.
    #[must_use]
    pub fn new(policy: RateLimitPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            policy,
            clock,
            records: Mutex::new(HashMap::new()),
        }
    }

    /// The policy this limiter enforces.
    #[must_use]
    pub fn policy(&self) -> RateLimitPolicy {
        self.policy
    }

    /// Counts a request against `client_key` and decides whether it may
    /// proceed. Check and increment happen under one lock. Rejected requests
    /// do not count.
    pub fn admit(&self, client_key: &str) -> Admission {
        let now = self.clock.now();
        let max = self.policy.max_requests();
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);

        let record = records
            .entry(client_key.to_owned())
            .or_insert(RateLimitRecord {
                count: 0,
                window_start: now,
            });

        if now - record.window_start >= self.policy.window {
            *record = RateLimitRecord {
                count: 0,
                window_start: now,
            };
        }

        if record.count >= max {
            let remaining = record.window_start + self.policy.window - now;
            return Admission::Rejected {
                retry_after_secs: ceil_secs(remaining),
            };
        }

        record.count += 1;
        Admission::Allowed {
            remaining: max - record.count,
        }
    }

    /// Number of client keys seen so far.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn ceil_secs(delta: TimeDelta) -> u64 {
    let secs = (delta.num_milliseconds() + 999) / 1000;
    u64::try_from(secs).unwrap_or(0).max(1)
}
