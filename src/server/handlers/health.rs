//! Liveness handler.

use axum::Json;

use super::timestamp;
use crate::server::types::HealthResponse;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: timestamp(),
    })
}
