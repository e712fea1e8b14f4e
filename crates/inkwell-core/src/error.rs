//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Authentication failed: {0}")]
    InvalidCredentials(CredentialError),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Administrator access required")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why a login attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("no account uses that email")]
    UnknownEmail,

    #[error("the password does not match")]
    WrongPassword,
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// A unique key rejected the write.
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Conflict(detail) => DomainError::Duplicate(detail),
            other => DomainError::Internal(other.to_string()),
        }
    }
}
