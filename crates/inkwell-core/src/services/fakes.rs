//! In-memory port implementations for service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    Comment, CommentWithAuthor, NewComment, NewPost, NewUser, Post, PostDraft, PostWithAuthor,
    Session, User,
};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BaseRepository, CommentRepository, PasswordService, PostRepository,
    SessionRepository, TokenClaims, TokenService, UserRepository,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    sessions: Vec<Session>,
    last_user_id: i32,
    last_post_id: i32,
    last_comment_id: i32,
}

impl Tables {
    fn user(&self, id: i32) -> Result<User, RepoError> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| RepoError::Constraint(format!("user {id} missing")))
    }
}

/// Mimics the relational store, unique keys included.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn post_count(&self) -> usize {
        self.tables.lock().unwrap().posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.tables.lock().unwrap().comments.len()
    }

    pub fn session_count(&self) -> usize {
        self.tables.lock().unwrap().sessions.len()
    }

    pub fn rename_user(&self, id: i32, name: &str) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.name = name.to_string();
        }
    }
}

#[async_trait]
impl BaseRepository<User, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.tables.lock().unwrap().user(id).ok())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Conflict("users.email".to_string()));
        }
        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, RepoError> {
        let tables = self.tables.lock().unwrap();
        tables
            .posts
            .iter()
            .map(|post| {
                Ok(PostWithAuthor {
                    post: post.clone(),
                    author: tables.user(post.author_id)?,
                })
            })
            .collect()
    }

    async fn find_with_author(&self, id: i32) -> Result<Option<PostWithAuthor>, RepoError> {
        let tables = self.tables.lock().unwrap();
        let Some(post) = tables.posts.iter().find(|p| p.id == id) else {
            return Ok(None);
        };
        Ok(Some(PostWithAuthor {
            post: post.clone(),
            author: tables.user(post.author_id)?,
        }))
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.posts.iter().any(|p| p.title == post.draft.title) {
            return Err(RepoError::Conflict("posts.title".to_string()));
        }
        tables.user(post.author_id)?;
        tables.last_post_id += 1;
        let post = Post {
            id: tables.last_post_id,
            author_id: post.author_id,
            title: post.draft.title,
            subtitle: post.draft.subtitle,
            date: post.date,
            body: post.draft.body,
            img_url: post.draft.img_url,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: i32, draft: PostDraft) -> Result<Post, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .posts
            .iter()
            .any(|p| p.id != id && p.title == draft.title)
        {
            return Err(RepoError::Conflict("posts.title".to_string()));
        }
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.title = draft.title;
        post.subtitle = draft.subtitle;
        post.body = draft.body;
        post.img_url = draft.img_url;
        Ok(post.clone())
    }

    async fn delete_with_comments(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.posts.iter().any(|p| p.id == id) {
            return Err(RepoError::NotFound);
        }
        tables.comments.retain(|c| c.post_id != id);
        tables.posts.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<Comment, i32> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        if tables.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_for_post(&self, post_id: i32) -> Result<Vec<CommentWithAuthor>, RepoError> {
        let tables = self.tables.lock().unwrap();
        tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|comment| {
                Ok(CommentWithAuthor {
                    comment: comment.clone(),
                    author: tables.user(comment.user_id)?,
                })
            })
            .collect()
    }

    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        tables.user(comment.user_id)?;
        if !tables.posts.iter().any(|p| p.id == comment.post_id) {
            return Err(RepoError::Constraint("comments.post_id".to_string()));
        }
        tables.last_comment_id += 1;
        let comment = Comment {
            id: tables.last_comment_id,
            user_id: comment.user_id,
            post_id: comment.post_id,
            text: comment.text,
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }
}

#[async_trait]
impl BaseRepository<Session, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, RepoError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.sessions.iter().find(|s| s.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.id != id);
        if tables.sessions.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn create(&self, session: Session) -> Result<Session, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        tables.user(session.user_id)?;
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepoError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.sessions.len();
        tables.sessions.retain(|s| !s.is_expired_at(now));
        Ok((before - tables.sessions.len()) as u64)
    }
}

/// Token = "<session id>:<user id>", unsigned.
pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn generate_token(&self, session: &Session) -> Result<String, AuthError> {
        Ok(format!("{}:{}", session.id, session.user_id))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let invalid = || AuthError::InvalidToken(token.to_string());
        let (session_id, user_id) = token.split_once(':').ok_or_else(invalid)?;
        Ok(TokenClaims {
            session_id: session_id.parse().map_err(|_| invalid())?,
            user_id: user_id.parse().map_err(|_| invalid())?,
            exp: i64::MAX,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}

/// Hash = "hashed:<password>".
pub struct FakePasswords;

impl PasswordService for FakePasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("hashed:") == Some(password)
    }
}
