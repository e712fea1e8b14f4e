//! Static pages.

use actix_web::HttpResponse;

use inkwell_shared::dto::StaticPage;

use super::views::viewer;
use crate::middleware::auth::CurrentIdentity;

fn static_page(page: &str, identity: &CurrentIdentity) -> HttpResponse {
    HttpResponse::Ok().json(StaticPage {
        page: page.to_string(),
        viewer: viewer(&identity.0),
    })
}

/// GET /about
pub async fn about(identity: CurrentIdentity) -> HttpResponse {
    static_page("about", &identity)
}

/// GET /contact
pub async fn contact(identity: CurrentIdentity) -> HttpResponse {
    static_page("contact", &identity)
}
