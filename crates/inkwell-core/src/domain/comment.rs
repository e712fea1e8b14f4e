use serde::{Deserialize, Serialize};

use super::user::User;

/// Comment entity - a user's reply under a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i32,
    pub user_id: i32,
    pub post_id: i32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub user_id: i32,
    pub post_id: i32,
    pub text: String,
}

/// A comment joined with the user who wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: User,
}
