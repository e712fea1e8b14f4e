use std::sync::Arc;

use chrono::{TimeDelta, Utc};

use crate::domain::{Identity, Session, SessionToken, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{SessionRepository, TokenService, UserRepository};

/// Resolves who is behind a request and moves sessions between the
/// anonymous and authenticated states.
///
/// Only ids are kept in the session table; the user row is reloaded on
/// every lookup so profile edits show up immediately.
pub struct SessionManager {
    sessions: Arc<dyn SessionRepository>,
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl SessionManager {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            sessions,
            users,
            tokens,
        }
    }

    /// Open a session for `user` and issue the signed token naming it.
    pub async fn login(&self, user: &User) -> Result<SessionToken, DomainError> {
        let ttl = self.tokens.expiration_seconds();
        let session = self
            .sessions
            .create(Session::start(user.id, TimeDelta::seconds(ttl)))
            .await?;

        let value = self
            .tokens
            .generate_token(&session)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(SessionToken {
            value,
            max_age_seconds: ttl,
        })
    }

    /// Delete the session behind `token`. Unknown or invalid tokens are
    /// already logged out.
    pub async fn logout(&self, token: &str) -> Result<(), DomainError> {
        let Ok(claims) = self.tokens.validate_token(token) else {
            return Ok(());
        };

        match self.sessions.delete(claims.session_id).await {
            Ok(()) | Err(RepoError::NotFound) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// The identity for a request carrying `token`, if any.
    pub async fn current_identity(&self, token: Option<&str>) -> Result<Identity, DomainError> {
        let Some(token) = token else {
            return Ok(Identity::Anonymous);
        };
        let Ok(claims) = self.tokens.validate_token(token) else {
            return Ok(Identity::Anonymous);
        };
        let Some(session) = self.sessions.find_by_id(claims.session_id).await? else {
            return Ok(Identity::Anonymous);
        };
        if session.user_id != claims.user_id || session.is_expired_at(Utc::now()) {
            return Ok(Identity::Anonymous);
        }

        let user = self.users.find_by_id(session.user_id).await?;
        Ok(user.map_or(Identity::Anonymous, Identity::Authenticated))
    }

    /// Remove expired sessions, returning how many were dropped.
    pub async fn purge_expired(&self) -> Result<u64, DomainError> {
        Ok(self.sessions.delete_expired(Utc::now()).await?)
    }
}
