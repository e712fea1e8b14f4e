//! Health check endpoint.

use actix_web::{HttpResponse, web};

use inkwell_shared::dto::HealthResponse;

use crate::state::AppState;

/// Liveness plus a database ping. Always `200`; `database` reports the pool.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = match state.db.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            "down"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
