//! HTTP surface over the analyzer.
//!
//! Endpoints:
//! - `GET /health`
//! - `POST /api/analyze` - full analysis report for one URL
//! - `POST /api/validate` - safety check and reachability for a list of URLs
//! - `POST /api/detect-redirect-loop`
//! - `POST /api/analyze/mobile-comparison`
//! - `POST /api/analyze/bot-test`
//! - `POST /api/analyze/with-auth`
//! - `POST /api/decode-shortener`
//! - `POST /api/bulk/analyze`
//!
//! Every URL is validated before anything is sent (400 on rejection) and every
//! endpoint except `/health` counts against the caller's daily quota (429).

mod handlers;
mod types;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use handlers::{
    analyze_handler, auth_handler, bot_test_handler, bulk_handler, health_handler, loop_handler,
    mobile_comparison_handler, shortener_handler, validate_handler,
};
pub use types::{ApiError, AppState};

/// Builds the router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/validate", post(validate_handler))
        .route("/api/detect-redirect-loop", post(loop_handler))
        .route(
            "/api/analyze/mobile-comparison",
            post(mobile_comparison_handler),
        )
        .route("/api/analyze/bot-test", post(bot_test_handler))
        .route("/api/analyze/with-auth", post(auth_handler))
        .route("/api/decode-shortener", post(shortener_handler))
        .route("/api/bulk/analyze", post(bulk_handler))
        .with_state(state)
}

/// Serves the router on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), anyhow::Error> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}

/// Binds `bind:port` and serves.
pub async fn start_server(bind: &str, port: u16, state: AppState) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind((bind, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}:{}: {}", bind, port, e))?;

    log::info!("Redirect analyzer listening on http://{}:{}/", bind, port);
    log::info!("  - Health: http://{}:{}/health", bind, port);
    log::info!("  - Analyze: POST http://{}:{}/api/analyze", bind, port);

    serve(listener, state).await
}
