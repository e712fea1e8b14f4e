//! Domain values projected into page view models.

use inkwell_core::domain::{CommentWithAuthor, Identity, Post, PostDraft, PostWithAuthor};
use inkwell_shared::dto::{CommentView, PostDetail, PostForm, PostSummary, Viewer};

pub fn viewer(identity: &Identity) -> Viewer {
    Viewer {
        logged_in: identity.is_authenticated(),
        is_admin: identity.is_admin(),
        name: identity.user().map(|u| u.name.clone()),
    }
}

pub fn post_summary(entry: PostWithAuthor) -> PostSummary {
    PostSummary {
        id: entry.post.id,
        title: entry.post.title,
        subtitle: entry.post.subtitle,
        date: entry.post.date,
        author: entry.author.name,
    }
}

pub fn post_detail(entry: PostWithAuthor) -> PostDetail {
    let PostWithAuthor { post, author } = entry;
    PostDetail {
        id: post.id,
        title: post.title,
        subtitle: post.subtitle,
        date: post.date,
        body: post.body,
        img_url: post.img_url,
        author: author.name,
    }
}

pub fn comment_view(entry: CommentWithAuthor) -> CommentView {
    CommentView {
        id: entry.comment.id,
        text: entry.comment.text,
        author: entry.author.name,
    }
}

pub fn post_form(post: &Post) -> PostForm {
    let draft = post.draft();
    PostForm {
        title: draft.title,
        subtitle: draft.subtitle,
        img_url: draft.img_url,
        body: draft.body,
    }
}

pub fn post_draft(form: PostForm) -> PostDraft {
    PostDraft {
        title: form.title,
        subtitle: form.subtitle,
        body: form.body,
        img_url: form.img_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwell_core::domain::User;

    fn user(id: i32) -> User {
        User {
            id,
            email: format!("user{id}@x.com"),
            password_hash: "hash".to_string(),
            name: format!("User {id}"),
        }
    }

    #[test]
    fn test_viewer_flags() {
        assert_eq!(viewer(&Identity::Anonymous), Viewer::default());

        let reader = viewer(&Identity::Authenticated(user(2)));
        assert!(reader.logged_in);
        assert!(!reader.is_admin);
        assert_eq!(reader.name.as_deref(), Some("User 2"));

        assert!(viewer(&Identity::Authenticated(user(1))).is_admin);
    }
}
