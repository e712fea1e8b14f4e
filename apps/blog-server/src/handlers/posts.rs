//! Post listing, post pages, comments and admin post management.

use actix_web::{HttpResponse, web};
use chrono::Local;

use inkwell_core::DomainError;
use inkwell_shared::dto::{CommentForm, IndexPage, PostEditorPage, PostForm, PostPage};

use super::views::{comment_view, post_detail, post_draft, post_form, post_summary, viewer};
use crate::middleware::auth::{Admin, CurrentIdentity};
use crate::middleware::error::AppResult;
use crate::middleware::flash::{Flash, IncomingFlash, redirect, redirect_with_flash, render};
use crate::state::AppState;

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> AppResult<HttpResponse> {
    let posts = state.blog.list_posts().await?;

    Ok(HttpResponse::Ok().json(IndexPage {
        posts: posts.into_iter().map(post_summary).collect(),
        viewer: viewer(&identity),
    }))
}

/// GET /post/{id}
pub async fn show_post(
    state: web::Data<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    flash: IncomingFlash,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let thread = state.blog.post_thread(path.into_inner()).await?;

    let page = PostPage {
        post: post_detail(thread.post),
        comments: thread.comments.into_iter().map(comment_view).collect(),
        flash: flash.message(),
        viewer: viewer(&identity),
    };
    Ok(render(&page, &flash))
}

/// POST /post/{id}
pub async fn add_comment(
    state: web::Data<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    path: web::Path<i32>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    match state
        .blog
        .add_comment(&identity, post_id, &form.comment)
        .await
    {
        Ok(comment) => {
            tracing::debug!(post_id, comment_id = comment.id, "Comment added");
            Ok(redirect(&format!("/post/{post_id}")))
        }
        Err(DomainError::Unauthenticated) => {
            Ok(redirect_with_flash("/login", Flash::LoginToComment))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /new-post
pub async fn new_post_page(admin: Admin, flash: IncomingFlash) -> HttpResponse {
    let page = PostEditorPage {
        form: PostForm::default(),
        post_id: None,
        flash: flash.message(),
        viewer: viewer(admin.identity()),
    };
    render(&page, &flash)
}

/// POST /new-post
pub async fn create_post(
    state: web::Data<AppState>,
    admin: Admin,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let today = Local::now().date_naive();

    match state
        .blog
        .create_post(admin.identity(), post_draft(form.into_inner()), today)
        .await
    {
        Ok(post) => {
            tracing::info!(post_id = post.id, title = %post.title, "Post created");
            Ok(redirect("/"))
        }
        Err(DomainError::Duplicate(_)) => {
            Ok(redirect_with_flash("/new-post", Flash::DuplicateTitle))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /edit-post/{id}
pub async fn edit_post_page(
    state: web::Data<AppState>,
    admin: Admin,
    flash: IncomingFlash,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = state.blog.get_post(path.into_inner()).await?;

    let page = PostEditorPage {
        form: post_form(&post),
        post_id: Some(post.id),
        flash: flash.message(),
        viewer: viewer(admin.identity()),
    };
    Ok(render(&page, &flash))
}

/// POST /edit-post/{id}
pub async fn edit_post(
    state: web::Data<AppState>,
    admin: Admin,
    path: web::Path<i32>,
    form: web::Form<PostForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state
        .blog
        .edit_post(admin.identity(), id, post_draft(form.into_inner()))
        .await
    {
        Ok(post) => {
            tracing::info!(post_id = post.id, "Post edited");
            Ok(redirect(&format!("/post/{}", post.id)))
        }
        Err(DomainError::Duplicate(_)) => Ok(redirect_with_flash(
            &format!("/edit-post/{id}"),
            Flash::DuplicateTitle,
        )),
        Err(e) => Err(e.into()),
    }
}

/// GET /delete/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    admin: Admin,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.blog.delete_post(admin.identity(), id).await?;

    tracing::info!(post_id = id, admin_id = ?admin.user().map(|u| u.id), "Post deleted");
    Ok(redirect("/"))
}
