//! Sparse distributed memory demo server.
//!
//! ## Endpoints
//!
//! - `GET  /` - Demo page
//! - `POST /` - Store text and read it back through the memory
//! - `GET  /generate-random` - Example address/data pair
//! - `POST /clear-memory` - Reset the memory
//! - `GET  /memory-stats` - Location count and write history
//! - `GET  /memory-history` - Write history
//! - `GET  /healthz` - Health check

mod config;
mod encoding;
mod handlers;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppState, ServerConfig};
use crate::handlers::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sdm_server=info,sdm_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = ServerConfig::from_env();
    let bind_addr = config.bind_addr();

    info!("Starting SDM demo server");
    info!("Address size: {} bits", config.address_size);
    info!("Hard locations: {}", config.num_locations);
    info!("Binding to: {}", bind_addr);

    // Create shared state (allocates the memory)
    let state = AppState::new(config).context("failed to initialize memory store")?;

    // Build router
    let app = Router::new()
        .route("/", get(home_page))
        .route("/", post(store_and_recall))
        .route("/generate-random", get(generate_random))
        .route("/clear-memory", post(clear_memory))
        .route("/memory-stats", get(memory_stats))
        .route("/memory-history", get(memory_history))
        .route("/healthz", get(health))
        // Add CORS support
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        // Add request tracing
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;

    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}
