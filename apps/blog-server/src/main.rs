//! # Inkwell Blog Server
//!
//! Actix-web entry point: configuration, database, migrations and routes.

use actix_web::{App, HttpServer};
use tracing_actix_web::TracingLogger;

use inkwell_infra::connect;
use migration::{Migrator, MigratorTrait};

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    let db = connect(&config.database)
        .await
        .map_err(std::io::Error::other)?;

    if config.auto_migrate {
        Migrator::up(&db, None).await.map_err(std::io::Error::other)?;
        tracing::info!("Migrations applied");
    }

    let state = AppState::new(db, &config);

    match state.sessions.purge_expired().await {
        Ok(purged) => tracing::info!(purged, "Expired sessions removed"),
        Err(e) => tracing::warn!(error = %e, "Could not purge expired sessions"),
    }

    tracing::info!(
        "Starting Inkwell blog server on {}:{}",
        config.host,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(|cfg| handlers::configure_routes(cfg, &state))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
