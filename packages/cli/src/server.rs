// ABOUTME: HTTP server bootstrap for the calculator service
// ABOUTME: Opens the database, layers CORS, tracing and panic handling over the API router, then serves

use anyhow::Context;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use calculator_api::create_router;
use calculator_projects::Services;
use calculator_storage::DbState;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::config::Config;
use crate::middleware::create_panic_handler;

/// Wrap the API router with the middleware stack
pub fn build_app(services: Services, config: &Config) -> anyhow::Result<Router> {
    let origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(create_router(services)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(create_panic_handler()))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let db = DbState::init_with_path(config.database_path.clone(), config.db_max_connections)
        .await
        .with_context(|| {
            format!(
                "Failed to open database at {}",
                config.database_path.display()
            )
        })?;

    let app = build_app(Services::new(&db), &config)?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}", addr);
    info!("CORS origin: {}", config.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
