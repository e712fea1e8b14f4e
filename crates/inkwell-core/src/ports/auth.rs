//! Authentication ports.

use uuid::Uuid;

use crate::domain::Session;

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub session_id: Uuid,
    pub user_id: i32,
    pub exp: i64,
}

/// Signs and checks the tokens that name a [`Session`].
pub trait TokenService: Send + Sync {
    /// Issue a signed token for a stored session.
    fn generate_token(&self, session: &Session) -> Result<String, AuthError>;

    /// Verify signature, issuer and expiry and decode the claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash. A hash that cannot be parsed
    /// never verifies.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
