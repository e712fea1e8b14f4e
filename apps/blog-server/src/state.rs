//! Application state - shared across all handlers.

use std::sync::Arc;

use sea_orm::DbConn;

use inkwell_core::services::{AccountService, BlogService, SessionManager};
use inkwell_infra::{
    Argon2PasswordService, JwtTokenService, SqlCommentRepository, SqlPostRepository,
    SqlSessionRepository, SqlUserRepository,
};

#[cfg(feature = "rate-limit")]
use inkwell_core::ports::RateLimiter;
#[cfg(feature = "rate-limit")]
use inkwell_infra::InMemoryRateLimiter;

use crate::config::AppConfig;
use crate::middleware::auth::SessionCookies;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub sessions: Arc<SessionManager>,
    pub blog: Arc<BlogService>,
    pub db: DbConn,
    pub cookies: SessionCookies,
    #[cfg(feature = "rate-limit")]
    pub limiter: Arc<dyn RateLimiter>,
}

impl AppState {
    /// Wire the services over an open connection pool.
    pub fn new(db: DbConn, config: &AppConfig) -> Self {
        let users = Arc::new(SqlUserRepository::new(db.clone()));
        let posts = Arc::new(SqlPostRepository::new(db.clone()));
        let comments = Arc::new(SqlCommentRepository::new(db.clone()));
        let sessions = Arc::new(SqlSessionRepository::new(db.clone()));

        let passwords = Arc::new(Argon2PasswordService::new());
        let tokens = Arc::new(JwtTokenService::new(config.jwt.clone()));

        tracing::info!("Application state initialized");

        Self {
            accounts: Arc::new(AccountService::new(users.clone(), passwords)),
            sessions: Arc::new(SessionManager::new(sessions, users, tokens)),
            blog: Arc::new(BlogService::new(posts, comments)),
            db,
            cookies: config.cookies.clone(),
            #[cfg(feature = "rate-limit")]
            limiter: Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone())),
        }
    }
}
