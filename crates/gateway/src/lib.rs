//! API Gateway Library
//!
//! This crate provides the HTTP REST API over the account services, which it
//! embeds in-process.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use account_service_lib::config::AccountServiceConfig;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect to the database, build the services and serve HTTP.
pub async fn run_server(
    config: GatewayConfig,
    accounts: AccountServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let (db, services) = account_service_lib::connect(accounts).await?;

    // Create app state
    let state = AppState::new(services, Some(Arc::new(db)));

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
