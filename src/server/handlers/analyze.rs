//! Single-URL handlers: analysis, loop detection, shortener decoding, basic auth.

use std::time::Instant;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use super::{enforce_rate_limit, ensure_safe, require_url, timestamp};
use crate::analysis::{shortener_service, AnalysisReport};
use crate::app::normalize_url;
use crate::fetch::walk;
use crate::loop_detection::detect_loop;
use crate::orchestrator::analyze_url;
use crate::rate_limit::EndpointClass;
use crate::server::types::{
    AnalyzeResponse, ApiError, AppState, AuthRequest, AuthResponse, LoopDetails, LoopResponse,
    ShortenerResponse, UrlRequest,
};
use crate::user_agent::{RequestIdentity, DESKTOP_USER_AGENT};

/// `POST /api/analyze`
pub async fn analyze_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UrlRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let decision = enforce_rate_limit(&state, &headers, EndpointClass::Basic)?;
    let url = require_url(body.url)?;
    let identity = state.identity(body.user_agent.as_deref());

    let started = Instant::now();
    let chain = analyze_url(&state.client, &url, &identity, &state.options).await?;
    let report = AnalysisReport::build(&url, &chain);

    Ok(Json(AnalyzeResponse {
        report,
        analysis_time_ms: started.elapsed().as_millis() as u64,
        timestamp: timestamp(),
        requests_remaining: decision.remaining(),
    }))
}

/// `POST /api/detect-redirect-loop`
pub async fn loop_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UrlRequest>,
) -> Result<Json<LoopResponse>, ApiError> {
    enforce_rate_limit(&state, &headers, EndpointClass::Basic)?;
    let url = require_url(body.url)?;
    let identity = state.identity(body.user_agent.as_deref());

    let chain = analyze_url(&state.client, &url, &identity, &state.options).await?;
    let report = detect_loop(&chain);
    let loop_details = report.start_index.map(|start| LoopDetails {
        loop_length: report.loop_length(),
        loop_urls: report.cycle_urls.clone(),
        loop_start_index: start,
    });

    Ok(Json(LoopResponse {
        url,
        loop_detected: report.detected,
        loop_details,
        hop_limit_reached: report.hop_limit_reached,
        total_redirects: chain.total_redirects(),
        error: chain.terminal_error.clone(),
        redirect_chain: chain.hops,
        timestamp: timestamp(),
    }))
}

/// `POST /api/decode-shortener`
pub async fn shortener_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UrlRequest>,
) -> Result<Json<ShortenerResponse>, ApiError> {
    enforce_rate_limit(&state, &headers, EndpointClass::Basic)?;
    let raw = require_url(body.url)?;
    let url = normalize_url(&raw)
        .ok_or_else(|| ApiError::BadRequest("Invalid URL format".to_string()))?;
    let identity = state.identity(body.user_agent.as_deref());

    let chain = analyze_url(&state.client, &url, &identity, &state.options).await?;
    let service = shortener_service(&url);

    Ok(Json(ShortenerResponse {
        expanded_url: chain.final_url_or(&url).to_string(),
        is_url_shortener: service.is_some(),
        shortener_service: service,
        redirect_count: chain.total_redirects(),
        error: chain.terminal_error.clone(),
        redirect_chain: chain.hops,
        original_url: url,
        timestamp: timestamp(),
    }))
}

/// `POST /api/analyze/with-auth`
///
/// Credentials are only attached when both username and password are non-empty.
pub async fn auth_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    enforce_rate_limit(&state, &headers, EndpointClass::Basic)?;
    let raw = require_url(body.url)?;
    let url = normalize_url(&raw)
        .ok_or_else(|| ApiError::BadRequest("Invalid URL format".to_string()))?;
    ensure_safe(&url)?;

    let user_agent = body
        .user_agent
        .filter(|ua| !ua.trim().is_empty())
        .unwrap_or_else(|| DESKTOP_USER_AGENT.to_string());
    let mut identity = RequestIdentity::new("auth", user_agent);
    let credentials = body
        .basic_auth_username
        .filter(|u| !u.is_empty())
        .zip(body.basic_auth_password.filter(|p| !p.is_empty()));
    let auth_used = credentials.is_some();
    if let Some((username, password)) = credentials {
        identity = identity.with_basic_auth(username, password);
    }

    let chain = walk(&state.client, &url, &identity, &state.options).await;

    Ok(Json(AuthResponse {
        auth_used,
        auth_required: chain.hops.iter().any(|h| h.status_code == 401),
        final_url: chain.final_url_or(&url).to_string(),
        total_redirects: chain.total_redirects(),
        error: chain.terminal_error.clone(),
        redirect_chain: chain.hops,
        url,
        timestamp: timestamp(),
    }))
}
