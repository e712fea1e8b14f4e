use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// User entity - a registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
}

/// A user row that has not been stored yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// Registration input as submitted. Holds the plaintext password only until
/// it is hashed.
#[derive(Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();
        super::require(&mut problems, "email", &self.email);
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            problems.push("email must be a valid address".to_string());
        }
        super::require(&mut problems, "password", &self.password);
        super::require(&mut problems, "name", &self.name);
        super::into_result(problems)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("name", &self.name)
            .finish()
    }
}

/// Email with the local part hidden, for log lines: `a***@example.com`.
pub fn masked_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(email: &str, password: &str, name: &str) -> Registration {
        Registration {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(registration("a@x.com", "pw1", "Ada").validate().is_ok());
    }

    #[test]
    fn test_registration_reports_every_problem() {
        let err = registration("not-an-email", " ", "").validate().unwrap_err();
        let DomainError::Validation(detail) = err else {
            panic!("expected validation error");
        };
        assert!(detail.contains("email must be a valid address"));
        assert!(detail.contains("password is required"));
        assert!(detail.contains("name is required"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", registration("a@x.com", "hunter2", "Ada"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_masked_email() {
        assert_eq!(masked_email("ada@example.com"), "a***@example.com");
        assert_eq!(masked_email("a@example.com"), "***@example.com");
        assert_eq!(masked_email("no-at-sign"), "***");
    }

    #[test]
    fn test_serialized_user_omits_hash() {
        let user = User {
            id: 7,
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: "Ada".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
