//! HTTP request handlers for the memory demo endpoints.
//!
//! Implements the demo surface:
//! - GET  /                 demo page
//! - POST /                 store text and read it back
//! - GET  /generate-random  example address/data pair
//! - POST /clear-memory     reset the memory
//! - GET  /memory-stats     location count + write history
//! - GET  /memory-history   write history only
//! - GET  /healthz          health check

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};
use uuid::Uuid;

use crate::config::AppState;
use crate::encoding::{decode_text, encode_text, random_ascii_string};

/// Form body for the store-and-recall endpoint.
#[derive(Debug, Deserialize)]
pub struct StoreForm {
    pub address: String,
    pub data: String,
    pub iterations: String,
}

/// GET /
pub async fn home_page() -> Html<&'static str> {
    Html(include_str!("../templates/index.html"))
}

/// POST /
///
/// Encode the address and data strings to fixed-width bit vectors, write
/// them into the memory and read the data back with the requested number
/// of convergence iterations.
pub async fn store_and_recall(
    State(state): State<AppState>,
    Form(form): Form<StoreForm>,
) -> (StatusCode, Json<Value>) {
    let width = state.memory.address_size();

    let iterations = match form.iterations.parse::<usize>() {
        Ok(n) if n > 0 => n,
        _ => {
            warn!(iterations = %form.iterations, "invalid iteration count");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Iterations must be a positive integer"})),
            );
        }
    };

    if form.address.len() > width || form.data.len() * 8 > width {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": format!(
                    "Address must be at most {} characters and data at most {} characters",
                    width,
                    width / 8
                )
            })),
        );
    }

    let address = encode_text(&form.address, width);
    let data = encode_text(&form.data, width);
    let stored = form.data;

    // The scan is CPU-bound; keep it off the async workers.
    let memory = state.memory.clone();
    let result = tokio::task::spawn_blocking(move || {
        memory.write(&address, &data)?;
        memory.read_with_iterations(&address, iterations)
    })
    .await;

    match result {
        Ok(Ok(recalled)) => (
            StatusCode::OK,
            Json(json!({
                "stored": stored,
                "retrieved": decode_text(&recalled),
            })),
        ),
        Ok(Err(e)) => {
            error!(error = %e, "memory operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
        }
        Err(e) => {
            error!(error = %e, "memory task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "memory task failed"})),
            )
        }
    }
}

/// GET /generate-random
///
/// Produce an example address/data pair for the demo page.
pub async fn generate_random() -> Json<Value> {
    let mut rng = rand::thread_rng();
    Json(json!({
        "address": Uuid::new_v4().to_string(),
        "data": random_ascii_string(24, &mut rng),
    }))
}

/// POST /clear-memory
pub async fn clear_memory(State(state): State<AppState>) -> impl IntoResponse {
    state.memory.clear();
    (StatusCode::OK, "Memory cleared\n")
}

/// GET /memory-stats
pub async fn memory_stats(State(state): State<AppState>) -> Json<Value> {
    let stats = state.memory.stats();
    Json(json!(stats))
}

/// GET /memory-history
pub async fn memory_history(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.memory.history()))
}

/// GET /healthz
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
