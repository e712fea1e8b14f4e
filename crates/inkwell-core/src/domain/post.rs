use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::user::User;
use crate::error::DomainError;

/// `strftime` pattern for the creation date shown on a post, e.g. "March 07, 2024".
pub const POST_DATE_FORMAT: &str = "%B %d, %Y";

/// Post entity - a blog article written by the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub body: String,
    pub img_url: String,
}

impl Post {
    /// The editable fields, used to pre-fill the edit form.
    pub fn draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            body: self.body.clone(),
            img_url: self.img_url.clone(),
        }
    }
}

/// The fields an editor submits. Id, date and author are never part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();
        super::require(&mut problems, "title", &self.title);
        super::require(&mut problems, "subtitle", &self.subtitle);
        super::require(&mut problems, "body", &self.body);
        super::require(&mut problems, "img_url", &self.img_url);
        if !self.img_url.trim().is_empty()
            && !(self.img_url.starts_with("http://") || self.img_url.starts_with("https://"))
        {
            problems.push("img_url must be an http(s) URL".to_string());
        }
        super::into_result(problems)
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: i32,
    pub date: String,
    pub draft: PostDraft,
}

impl NewPost {
    /// Stamp a draft with its author and creation date.
    pub fn new(author_id: i32, draft: PostDraft, today: NaiveDate) -> Self {
        Self {
            author_id,
            date: format_post_date(today),
            draft,
        }
    }
}

/// A post joined with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: User,
}

pub fn format_post_date(date: NaiveDate) -> String {
    date.format(POST_DATE_FORMAT).to_string()
}
