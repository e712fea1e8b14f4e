//! Rate limiting port.

use async_trait::async_trait;
use std::time::Duration;

/// Throttles repeated requests from the same client, e.g. login attempts.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Record one request for `key` and report whether it may proceed.
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError>;
}

/// Result of a rate limit check.
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    /// When denied, how long until the next request for the key is admitted.
    pub retry_after: Duration,
}

/// Rate limit errors.
#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Backend error: {0}")]
    Backend(String),
}
