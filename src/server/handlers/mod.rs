//! HTTP handlers.

mod analyze;
mod bulk;
mod compare;
mod health;

pub use analyze::{analyze_handler, auth_handler, loop_handler, shortener_handler};
pub use bulk::{bulk_handler, validate_handler};
pub use compare::{bot_test_handler, mobile_comparison_handler};
pub use health::health_handler;

use axum::http::HeaderMap;
use chrono::Utc;

use super::types::{ApiError, AppState};
use crate::error_handling::AnalyzeError;
use crate::rate_limit::{check_rate_limit, EndpointClass, RateLimitDecision};
use crate::security::validate_url;

impl From<AnalyzeError> for ApiError {
    fn from(err: AnalyzeError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// Client address: `cf-connecting-ip`, else the first `x-forwarded-for` entry.
pub(crate) fn client_ip(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(ip) = header("cf-connecting-ip") {
        return ip.to_string();
    }
    header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

fn enforce_rate_limit(
    state: &AppState,
    headers: &HeaderMap,
    class: EndpointClass,
) -> Result<RateLimitDecision, ApiError> {
    let ip = client_ip(headers);
    let decision = check_rate_limit(state.store.as_ref(), class, &ip, Utc::now().date_naive());
    if decision.allowed {
        Ok(decision)
    } else {
        log::info!("Rate limit exceeded for {} on {} endpoints", ip, class);
        Err(ApiError::RateLimited(decision))
    }
}

fn require_url(url: Option<String>) -> Result<String, ApiError> {
    url.map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::BadRequest("URL is required".to_string()))
}

/// Rejects unsafe URLs before anything is sent.
fn ensure_safe(url: &str) -> Result<(), ApiError> {
    let verdict = validate_url(url);
    if verdict.valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest(verdict.reason.unwrap_or_default()))
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}
