//! Per-key in-memory rate limiter built on governor.

use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota};

use inkwell_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window and key.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    /// Load from `RATE_LIMIT_MAX_REQUESTS` and `RATE_LIMIT_WINDOW_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests),
            window: std::env::var("RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.window),
        }
    }

    fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.max_requests).unwrap_or(NonZeroU32::MIN);
        Quota::with_period(self.window / burst.get())
            .unwrap_or_else(|| Quota::per_minute(burst))
            .allow_burst(burst)
    }
}

/// Checks between two sweeps of recovered keys.
const PRUNE_EVERY: u64 = 1024;

/// GCRA limiter keyed by client (usually the peer IP).
///
/// Limits are per-process; several instances each keep their own budget.
/// Keys whose budget has fully recovered are swept every [`PRUNE_EVERY`]
/// checks, so memory is bounded by the clients seen within one window.
pub struct InMemoryRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
    checks: AtomicU64,
    prune_every: u64,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_prune_interval(config, PRUNE_EVERY)
    }

    fn with_prune_interval(config: RateLimitConfig, prune_every: u64) -> Self {
        tracing::debug!(
            max_requests = config.max_requests,
            window_secs = config.window.as_secs(),
            "Rate limiter configured"
        );
        Self {
            limiter: DefaultKeyedRateLimiter::keyed(config.quota()),
            clock: DefaultClock::default(),
            checks: AtomicU64::new(0),
            prune_every: prune_every.max(1),
        }
    }

    fn prune_if_due(&self) {
        let seen = self.checks.fetch_add(1, Ordering::Relaxed) + 1;
        if seen % self.prune_every == 0 {
            self.limiter.retain_recent();
            self.limiter.shrink_to_fit();
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        self.prune_if_due();

        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => Ok(RateLimitResult {
                allowed: true,
                retry_after: Duration::ZERO,
            }),
            Err(not_until) => Ok(RateLimitResult {
                allowed: false,
                retry_after: not_until.wait_time_from(self.clock.now()),
            }),
        }
    }
}
