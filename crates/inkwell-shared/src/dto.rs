//! Data Transfer Objects: submitted forms and the JSON view model of each page.

use serde::{Deserialize, Serialize};

/// Registration form.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("name", &self.name)
            .finish()
    }
}

/// Login form.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Comment form posted to `/post/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentForm {
    pub comment: String,
}

/// Post editor form, used for both create and edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
}

/// Who is looking at the page. Templates use it for the nav bar and the
/// admin-only controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub logged_in: bool,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// One entry of the post listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub author: String,
}

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexPage {
    pub posts: Vec<PostSummary>,
    pub viewer: Viewer,
}

/// `GET /register` and `GET /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
    pub viewer: Viewer,
}

/// Full article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub body: String,
    pub img_url: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: i32,
    pub text: String,
    pub author: String,
}

/// `GET /post/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPage {
    pub post: PostDetail,
    pub comments: Vec<CommentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
    pub viewer: Viewer,
}

/// `GET /new-post` and `GET /edit-post/{id}`. `post_id` is set when editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEditorPage {
    pub form: PostForm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
    pub viewer: Viewer,
}

/// `GET /about` and `GET /contact`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPage {
    pub page: String,
    pub viewer: Viewer,
}

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub timestamp: String,
}
