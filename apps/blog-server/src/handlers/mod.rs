//! HTTP handlers and route configuration.

mod auth;
mod health;
mod pages;
mod posts;
mod views;


use actix_web::{HttpRequest, HttpResponse, web};

use inkwell_shared::ErrorResponse;

use crate::middleware::error::AppError;
use crate::observability::RequestId;
use crate::state::AppState;

#[cfg(feature = "rate-limit")]
use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes over `state`.
pub fn configure_routes(cfg: &mut web::ServiceConfig, state: &AppState) {
    let register = web::resource("/register")
        .route(web::get().to(auth::register_page))
        .route(web::post().to(auth::register));
    let login = web::resource("/login")
        .route(web::get().to(auth::login_page))
        .route(web::post().to(auth::login));

    #[cfg(feature = "rate-limit")]
    let (register, login) = (
        register.wrap(RateLimitMiddleware::new(state.limiter.clone())),
        login.wrap(RateLimitMiddleware::new(state.limiter.clone())),
    );

    cfg.app_data(web::Data::new(state.clone()))
        .app_data(
            web::FormConfig::default()
                .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
        )
        .route("/", web::get().to(posts::index))
        .service(register)
        .service(login)
        .route("/logout", web::get().to(auth::logout))
        .service(
            web::resource("/post/{id}")
                .route(web::get().to(posts::show_post))
                .route(web::post().to(posts::add_comment)),
        )
        .route("/about", web::get().to(pages::about))
        .route("/contact", web::get().to(pages::contact))
        .service(
            web::resource("/new-post")
                .route(web::get().to(posts::new_post_page))
                .route(web::post().to(posts::create_post)),
        )
        .service(
            web::resource("/edit-post/{id}")
                .route(web::get().to(posts::edit_post_page))
                .route(web::post().to(posts::edit_post)),
        )
        .route("/delete/{id}", web::get().to(posts::delete_post))
        .route("/health", web::get().to(health::health_check))
        .default_service(web::to(not_found));
}

async fn not_found(req: HttpRequest, request_id: RequestId) -> HttpResponse {
    HttpResponse::NotFound().json(
        ErrorResponse::not_found("No page at this address.")
            .with_instance(req.path())
            .with_request_id(request_id.as_str()),
    )
}
