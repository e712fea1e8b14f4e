use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

/// A server-side login session. The signed token handed to the browser only
/// names the session; deleting the row invalidates the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Open a new session for a user, valid for `ttl`.
    pub fn start(user_id: i32, ttl: TimeDelta) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// The credential issued on login.
#[derive(Clone)]
pub struct SessionToken {
    pub value: String,
    pub max_age_seconds: i64,
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &"[redacted]")
            .field("max_age_seconds", &self.max_age_seconds)
            .finish()
    }
}
