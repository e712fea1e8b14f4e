//! Entity-specific repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    Unchanged,
};

use inkwell_core::domain::{
    Comment, CommentWithAuthor, NewComment, NewPost, NewUser, Post, PostDraft, PostWithAuthor,
    Session, User, masked_email,
};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{CommentRepository, PostRepository, SessionRepository, UserRepository};

use super::base::{SqlRepository, map_db_err};
use super::entity::{comment, post, session, user};

/// SQL user repository.
pub type SqlUserRepository = SqlRepository<user::Entity>;

/// SQL post repository.
pub type SqlPostRepository = SqlRepository<post::Entity>;

/// SQL comment repository.
pub type SqlCommentRepository = SqlRepository<comment::Entity>;

/// SQL session repository.
pub type SqlSessionRepository = SqlRepository<session::Entity>;

fn with_author(
    post: post::Model,
    author: Option<user::Model>,
) -> Result<PostWithAuthor, RepoError> {
    let author = author.ok_or_else(|| {
        RepoError::Constraint(format!("post {} references a missing author", post.id))
    })?;

    Ok(PostWithAuthor {
        post: post.into(),
        author: author.into(),
    })
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %masked_email(email), "Finding user by email");

        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(new_user)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(user_id = model.id, "User row inserted");
        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let rows = post::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .map(|(post, author)| with_author(post, author))
            .collect()
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let row = post::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        row.map(|(post, author)| with_author(post, author))
            .transpose()
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(new_post)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, draft: PostDraft) -> Result<Post, RepoError> {
        let changes = post::ActiveModel {
            id: Unchanged(id),
            title: Set(draft.title),
            subtitle: Set(draft.subtitle),
            body: Set(draft.body),
            img_url: Set(draft.img_url),
            ..Default::default()
        };

        let model = changes.update(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete_with_comments(&self, id: i32) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let removed_comments = comment::Entity::delete_many()
            .filter(comment::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let removed_post = post::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if removed_post.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(
            post_id = id,
            comments = removed_comments.rows_affected,
            "Post deleted with its comments"
        );

        Ok(())
    }
}

#[async_trait]
impl CommentRepository for SqlCommentRepository {
    async fn list_for_post(&self, post_id: i32) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let rows = comment::Entity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .find_also_related(user::Entity)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter()
            .map(|(comment, author)| {
                let author = author.ok_or_else(|| {
                    RepoError::Constraint(format!(
                        "comment {} references a missing user",
                        comment.id
                    ))
                })?;
                Ok(CommentWithAuthor {
                    comment: comment.into(),
                    author: author.into(),
                })
            })
            .collect()
    }

    async fn create(&self, new_comment: NewComment) -> Result<Comment, RepoError> {
        let model = comment::ActiveModel::from(new_comment)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }
}

#[async_trait]
impl SessionRepository for SqlSessionRepository {
    async fn create(&self, new_session: Session) -> Result<Session, RepoError> {
        let model = session::ActiveModel::from(new_session)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepoError> {
        let result = session::Entity::delete_many()
            .filter(session::Column::ExpiresAt.lte(now))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}
