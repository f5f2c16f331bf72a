//! API Gateway Library
//!
//! HTTP surface of the service: registration, Basic-auth login, the uniform
//! error body and the API documentation.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tracing::info;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect the store, apply migrations and serve until interrupted.
pub async fn run(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!(database = ?config.database, "Connecting to user store");
    let services = user_service_lib::connect(&config.database).await?;
    info!("Database connected");

    let app = create_router(AppState::from(services));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
