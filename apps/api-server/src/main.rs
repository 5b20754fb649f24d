//! # Quire API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::error::not_found;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Quire API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = web::Data::new(AppState::new(config.database.as_ref()).await);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .configure(handlers::configure_routes)
            .default_service(web::to(not_found))
    })
    .client_request_timeout(config.request_timeout)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
