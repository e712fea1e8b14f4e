//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use inkwell_infra::{DatabaseConfig, JwtConfig};

#[cfg(feature = "rate-limit")]
use inkwell_infra::RateLimitConfig;

use crate::middleware::auth::SessionCookies;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Run pending migrations before serving.
    pub auto_migrate: bool,
    pub jwt: JwtConfig,
    pub cookies: SessionCookies,
    #[cfg(feature = "rate-limit")]
    pub rate_limit: RateLimitConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: DatabaseConfig {
                url: "sqlite://blog.db?mode=rwc".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            auto_migrate: true,
            jwt: JwtConfig::default(),
            cookies: SessionCookies::default(),
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig::default(),
        }
    }
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT", defaults.port),
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parsed("DB_MAX_CONNECTIONS", defaults.database.max_connections),
                min_connections: parsed("DB_MIN_CONNECTIONS", defaults.database.min_connections),
            },
            auto_migrate: parsed("DB_AUTO_MIGRATE", defaults.auto_migrate),
            jwt: JwtConfig::from_env(),
            cookies: SessionCookies {
                name: env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookies.name),
                secure: parsed("SESSION_COOKIE_SECURE", defaults.cookies.secure),
            },
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}
