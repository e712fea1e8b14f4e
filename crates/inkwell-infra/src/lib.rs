//! # Inkwell Infrastructure
//!
//! Concrete implementations of the ports defined in `inkwell-core`.
//!
//! ## Feature Flags
//!
//! - `rate-limit` (default) - login/registration throttling via governor

pub mod auth;
pub mod database;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{
    DatabaseConfig, SqlCommentRepository, SqlPostRepository, SqlSessionRepository,
    SqlUserRepository, connect,
};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
