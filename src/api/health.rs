//! Liveness endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

/// Version embedded at compile time from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

const STATUS: &str = "Backend and frontend ready!";

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    version: &'static str,
}

pub fn router() -> Router {
    Router::new().route("/", get(health))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS,
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: VERSION,
    })
}
