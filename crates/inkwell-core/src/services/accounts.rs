use std::sync::Arc;

use crate::domain::{NewUser, Registration, User};
use crate::error::{CredentialError, DomainError, RepoError};
use crate::ports::{PasswordService, UserRepository};

/// Registration and credential checks.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Create an account. The unique key on the email column decides
    /// whether the address is taken, so concurrent sign-ups cannot both win.
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        registration.validate()?;

        let password_hash = self
            .passwords
            .hash(&registration.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let new_user = NewUser {
            email: registration.email,
            password_hash,
            name: registration.name,
        };

        self.users.create(new_user).await.map_err(|e| match e {
            RepoError::Conflict(_) => {
                DomainError::Duplicate("email already registered".to_string())
            }
            other => other.into(),
        })
    }

    /// Look the email up anywhere in the user table and check the password.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::InvalidCredentials(CredentialError::UnknownEmail))?;

        if !self.passwords.verify(password, &user.password_hash) {
            return Err(DomainError::InvalidCredentials(
                CredentialError::WrongPassword,
            ));
        }

        Ok(user)
    }
}
