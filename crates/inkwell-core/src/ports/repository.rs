use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Comment, CommentWithAuthor, NewComment, NewPost, NewUser, Post, PostDraft, PostWithAuthor,
    Session, User,
};
use crate::error::RepoError;

/// Generic repository trait defining the lookups every table supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with [`RepoError::NotFound`] when no row matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    /// Find a user by their email address (exact match, unique index).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a user. A taken email fails with [`RepoError::Conflict`].
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    /// All posts with their authors, in id order.
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError>;

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError>;

    /// Insert a post. A taken title fails with [`RepoError::Conflict`].
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Overwrite the editable fields of a post, leaving id, date and author untouched.
    async fn update(&self, id: i32, draft: PostDraft) -> Result<Post, RepoError>;

    /// Remove a post and all of its comments atomically.
    async fn delete_with_comments(&self, id: i32) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i32> {
    /// Comments under a post with their authors, oldest first.
    async fn list_for_post(&self, post_id: i32) -> Result<Vec<CommentWithAuthor>, RepoError>;

    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError>;
}

/// Session table backing the signed session tokens.
#[async_trait]
pub trait SessionRepository: BaseRepository<Session, Uuid> {
    async fn create(&self, session: Session) -> Result<Session, RepoError>;

    /// Drop every session that expired before `now`, returning how many were removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepoError>;
}
