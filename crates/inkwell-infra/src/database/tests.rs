use chrono::{TimeDelta, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{DatabaseBackend, DbConn, MockDatabase};

use inkwell_core::domain::{NewComment, NewPost, NewUser, Post, PostDraft, Session, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{
    BaseRepository, CommentRepository, PostRepository, SessionRepository, UserRepository,
};

use super::entity::{post, user};
use super::{
    DatabaseConfig, SqlCommentRepository, SqlPostRepository, SqlSessionRepository,
    SqlUserRepository, connect,
};

async fn migrated_sqlite() -> DbConn {
    let db = connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    })
    .await
    .unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        name: "Ada".to_string(),
    }
}

fn draft(title: &str) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        subtitle: "Subtitle".to_string(),
        body: "<p>Body</p>".to_string(),
        img_url: "https://images.example.com/a.jpg".to_string(),
    }
}

fn new_post(author_id: i32, title: &str) -> NewPost {
    NewPost {
        author_id,
        date: "March 07, 2024".to_string(),
        draft: draft(title),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post::Model {
            id: 3,
            author_id: 1,
            title: "Test Post".to_owned(),
            subtitle: "Sub".to_owned(),
            date: "March 07, 2024".to_owned(),
            body: "Content".to_owned(),
            img_url: "https://example.com/a.png".to_owned(),
        }]])
        .into_connection();

    let repo = SqlPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(3).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, 3);
}

#[tokio::test]
async fn test_find_user_by_email_maps_password_column() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: 2,
            email: "ada@example.com".to_owned(),
            password: "$argon2id$stored".to_owned(),
            name: "Ada".to_owned(),
        }]])
        .into_connection();

    let repo = SqlUserRepository::new(db);

    let user = repo.find_by_email("ada@example.com").await.unwrap().unwrap();

    assert_eq!(user.password_hash, "$argon2id$stored");
    assert_eq!(user.name, "Ada");
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let db = migrated_sqlite().await;
    let users = SqlUserRepository::new(db);

    let first = users.create(new_user("a@x.com")).await.unwrap();
    let second = users.create(new_user("a@x.com")).await;

    assert_eq!(first.id, 1);
    assert!(matches!(second, Err(RepoError::Conflict(_))));
    let found: Option<User> = users.find_by_id(2).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_by_email_searches_whole_table() {
    let db = migrated_sqlite().await;
    let users = SqlUserRepository::new(db);
    for email in ["first@x.com", "second@x.com", "third@x.com"] {
        users.create(new_user(email)).await.unwrap();
    }

    let third = users.find_by_email("third@x.com").await.unwrap().unwrap();
    assert_eq!(third.id, 3);
    assert!(users.find_by_email("THIRD@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_post_title_is_unique_on_create_and_update() {
    let db = migrated_sqlite().await;
    let users = SqlUserRepository::new(db.clone());
    let posts = SqlPostRepository::new(db);
    let admin = users.create(new_user("admin@x.com")).await.unwrap();

    posts.create(new_post(admin.id, "One")).await.unwrap();
    let two = posts.create(new_post(admin.id, "Two")).await.unwrap();

    assert!(matches!(
        posts.create(new_post(admin.id, "One")).await,
        Err(RepoError::Conflict(_))
    ));
    assert!(matches!(
        posts.update(two.id, draft("One")).await,
        Err(RepoError::Conflict(_))
    ));
    assert_eq!(posts.list_with_authors().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_overwrites_editable_fields_only() {
    let db = migrated_sqlite().await;
    let users = SqlUserRepository::new(db.clone());
    let posts = SqlPostRepository::new(db);
    let admin = users.create(new_user("admin@x.com")).await.unwrap();
    let created = posts.create(new_post(admin.id, "Before")).await.unwrap();

    let mut changes = draft("After");
    changes.body = "<p>New body</p>".to_string();
    let updated = posts.update(created.id, changes).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.date, created.date);
    assert_eq!(updated.author_id, admin.id);
    assert_eq!(updated.title, "After");
    assert_eq!(updated.body, "<p>New body</p>");
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let db = migrated_sqlite().await;
    let posts = SqlPostRepository::new(db);

    assert!(matches!(
        posts.update(99, draft("Ghost")).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_threads_join_authors() {
    let db = migrated_sqlite().await;
    let users = SqlUserRepository::new(db.clone());
    let posts = SqlPostRepository::new(db.clone());
    let comments = SqlCommentRepository::new(db);
    let admin = users.create(new_user("admin@x.com")).await.unwrap();
    let reader = users.create(new_user("reader@x.com")).await.unwrap();
    let post = posts.create(new_post(admin.id, "Hello")).await.unwrap();

    for (user_id, text) in [(reader.id, "first!"), (admin.id, "thanks")] {
        comments
            .create(NewComment {
                user_id,
                post_id: post.id,
                text: text.to_string(),
            })
            .await
            .unwrap();
    }

    let listed = posts.find_with_author(post.id).await.unwrap().unwrap();
    assert_eq!(listed.author.email, "admin@x.com");

    let thread = comments.list_for_post(post.id).await.unwrap();
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].comment.text, "first!");
    assert_eq!(thread[0].author.email, "reader@x.com");
    assert_eq!(thread[1].author.id, admin.id);
}

#[tokio::test]
async fn test_comment_on_missing_post_violates_foreign_key() {
    let db = migrated_sqlite().await;
    let users = SqlUserRepository::new(db.clone());
    let comments = SqlCommentRepository::new(db);
    let reader = users.create(new_user("reader@x.com")).await.unwrap();

    let result = comments
        .create(NewComment {
            user_id: reader.id,
            post_id: 404,
            text: "hello?".to_string(),
        })
        .await;

    assert!(matches!(result, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_delete_with_comments() {
    let db = migrated_sqlite().await;
    let users = SqlUserRepository::new(db.clone());
    let posts = SqlPostRepository::new(db.clone());
    let comments = SqlCommentRepository::new(db);
    let admin = users.create(new_user("admin@x.com")).await.unwrap();
    let doomed = posts.create(new_post(admin.id, "Doomed")).await.unwrap();
    let kept = posts.create(new_post(admin.id, "Kept")).await.unwrap();
    for post_id in [doomed.id, doomed.id, kept.id] {
        comments
            .create(NewComment {
                user_id: admin.id,
                post_id,
                text: "note".to_string(),
            })
            .await
            .unwrap();
    }

    posts.delete_with_comments(doomed.id).await.unwrap();

    assert!(posts.find_with_author(doomed.id).await.unwrap().is_none());
    assert!(comments.list_for_post(doomed.id).await.unwrap().is_empty());
    assert_eq!(comments.list_for_post(kept.id).await.unwrap().len(), 1);
    assert!(matches!(
        posts.delete_with_comments(doomed.id).await,
        Err(RepoError::NotFound)
    ));
}

#[tokio::test]
async fn test_session_lifecycle() {
    let db = migrated_sqlite().await;
    let users = SqlUserRepository::new(db.clone());
    let sessions = SqlSessionRepository::new(db);
    let user = users.create(new_user("a@x.com")).await.unwrap();

    let live = sessions
        .create(Session::start(user.id, TimeDelta::hours(1)))
        .await
        .unwrap();
    let mut stale = Session::start(user.id, TimeDelta::hours(1));
    stale.expires_at = Utc::now() - TimeDelta::minutes(5);
    let stale = sessions.create(stale).await.unwrap();

    let found: Option<Session> = sessions.find_by_id(live.id).await.unwrap();
    assert_eq!(found.map(|s| s.user_id), Some(user.id));

    assert_eq!(sessions.delete_expired(Utc::now()).await.unwrap(), 1);
    let gone: Option<Session> = sessions.find_by_id(stale.id).await.unwrap();
    assert!(gone.is_none());

    sessions.delete(live.id).await.unwrap();
    assert!(matches!(
        sessions.delete(live.id).await,
        Err(RepoError::NotFound)
    ));
}
