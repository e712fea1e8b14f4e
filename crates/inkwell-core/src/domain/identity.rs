use super::user::User;
use crate::error::DomainError;

/// Id of the single account allowed to create, edit and delete posts.
pub const ADMIN_ID: i32 = 1;

/// The actor behind a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Identity {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Authenticated(user) => Some(user),
            Identity::Anonymous => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        is_admin(self)
    }
}

/// True only for an authenticated identity whose id is [`ADMIN_ID`].
pub fn is_admin(identity: &Identity) -> bool {
    matches!(identity, Identity::Authenticated(user) if user.id == ADMIN_ID)
}

/// Guard for post management: yields the administrator or `Forbidden`.
pub fn authorize_admin(identity: &Identity) -> Result<&User, DomainError> {
    match identity {
        Identity::Authenticated(user) if is_admin(identity) => Ok(user),
        _ => Err(DomainError::Forbidden),
    }
}
