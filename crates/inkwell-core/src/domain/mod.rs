//! Domain entities - the core business objects.

mod comment;
mod identity;
mod post;
mod session;
mod user;

pub use comment::{Comment, CommentWithAuthor, NewComment};
pub use identity::{ADMIN_ID, Identity, authorize_admin, is_admin};
pub use post::{NewPost, POST_DATE_FORMAT, Post, PostDraft, PostWithAuthor, format_post_date};
pub use session::{Session, SessionToken};
pub use user::{NewUser, Registration, User, masked_email};

use crate::error::DomainError;

/// Records a problem when a required text field is blank.
fn require(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{field} is required"));
    }
}

fn into_result(problems: Vec<String>) -> Result<(), DomainError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(problems.join(", ")))
    }
}
