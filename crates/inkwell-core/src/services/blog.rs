use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{
    Comment, CommentWithAuthor, Identity, NewComment, NewPost, Post, PostDraft, PostWithAuthor,
    authorize_admin,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, PostRepository};

/// A post page: the article, its author and the discussion under it.
#[derive(Debug, Clone)]
pub struct PostThread {
    pub post: PostWithAuthor,
    pub comments: Vec<CommentWithAuthor>,
}

/// Reading and managing posts and comments.
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

fn post_not_found(id: i32) -> DomainError {
    DomainError::NotFound {
        entity_type: "Post",
        id,
    }
}

fn duplicate_title() -> DomainError {
    DomainError::Duplicate("post title already used".to_string())
}

/// Maps repository failures on a post write, naming the post when it is gone.
fn post_write_error(id: i32, err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => post_not_found(id),
        RepoError::Conflict(_) => duplicate_title(),
        other => other.into(),
    }
}

impl BlogService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        Ok(self.posts.list_with_authors().await?)
    }

    pub async fn get_post(&self, id: i32) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| post_not_found(id))
    }

    pub async fn post_thread(&self, id: i32) -> Result<PostThread, DomainError> {
        let post = self
            .posts
            .find_with_author(id)
            .await?
            .ok_or_else(|| post_not_found(id))?;
        let comments = self.comments.list_for_post(id).await?;

        Ok(PostThread { post, comments })
    }

    /// Publish a post authored by the administrator, dated `today`.
    pub async fn create_post(
        &self,
        identity: &Identity,
        draft: PostDraft,
        today: NaiveDate,
    ) -> Result<Post, DomainError> {
        let admin = authorize_admin(identity)?;
        draft.validate()?;

        self.posts
            .create(NewPost::new(admin.id, draft, today))
            .await
            .map_err(|e| match e {
                RepoError::Conflict(_) => duplicate_title(),
                other => other.into(),
            })
    }

    pub async fn edit_post(
        &self,
        identity: &Identity,
        id: i32,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        authorize_admin(identity)?;
        draft.validate()?;

        self.posts
            .update(id, draft)
            .await
            .map_err(|e| post_write_error(id, e))
    }

    /// Delete a post together with its comments.
    pub async fn delete_post(&self, identity: &Identity, id: i32) -> Result<(), DomainError> {
        authorize_admin(identity)?;

        self.posts
            .delete_with_comments(id)
            .await
            .map_err(|e| post_write_error(id, e))
    }

    /// Attach a comment from the current user to a post.
    pub async fn add_comment(
        &self,
        identity: &Identity,
        post_id: i32,
        text: &str,
    ) -> Result<Comment, DomainError> {
        let user = identity.user().ok_or(DomainError::Unauthenticated)?;
        if text.trim().is_empty() {
            return Err(DomainError::Validation("comment is required".to_string()));
        }
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(post_not_found(post_id));
        }

        let comment = NewComment {
            user_id: user.id,
            post_id,
            text: text.to_string(),
        };
        self.comments
            .create(comment)
            .await
            .map_err(|e| match e {
                RepoError::Constraint(_) => post_not_found(post_id),
                other => other.into(),
            })
    }
}
