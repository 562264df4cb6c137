//! HTTP surface data structures.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::analysis::AnalysisReport;
use crate::config::Config;
use crate::fetch::WalkOptions;
use crate::models::Hop;
use crate::orchestrator::{BulkOutcome, VariantResult};
use crate::rate_limit::{CounterStore, MemoryCounterStore, RateLimitDecision};
use crate::user_agent::RequestIdentity;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub store: Arc<dyn CounterStore>,
    pub options: WalkOptions,
    /// User-Agent for requests that do not name one
    pub user_agent: String,
}

impl AppState {
    /// State backed by an in-process counter store.
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self::with_store(client, config, Arc::new(MemoryCounterStore::new()))
    }

    pub fn with_store(
        client: reqwest::Client,
        config: &Config,
        store: Arc<dyn CounterStore>,
    ) -> Self {
        Self {
            client,
            store,
            options: config.walk_options(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Identity for a request body's optional `user_agent`.
    pub(crate) fn identity(&self, user_agent: Option<&str>) -> RequestIdentity {
        match user_agent.filter(|ua| !ua.trim().is_empty()) {
            Some(ua) => RequestIdentity::new("custom", ua),
            None => RequestIdentity::new("default", self.user_agent.as_str()),
        }
    }
}

/// Handler failures mapped to status codes.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 400 with a human-readable reason
    BadRequest(String),
    /// 400 with a short error and a longer message
    InvalidRequest { error: String, message: String },
    /// 429
    RateLimited(RateLimitDecision),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
            }
            ApiError::InvalidRequest { error, message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response(),
            ApiError::RateLimited(decision) => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "error": "Rate limit exceeded",
                    "message": format!("Free tier allows {} requests per day", decision.limit),
                    "requests_used": decision.count,
                })),
            )
                .into_response(),
        }
    }
}

/// Body with a single URL and an optional User-Agent.
#[derive(Debug, Default, Deserialize)]
pub struct UrlRequest {
    pub url: Option<String>,
    pub user_agent: Option<String>,
}

/// Body for the bot comparison.
#[derive(Debug, Default, Deserialize)]
pub struct BotTestRequest {
    pub url: Option<String>,
    pub bots: Option<Vec<String>>,
}

/// Body for the authenticated walk.
#[derive(Debug, Default, Deserialize)]
pub struct AuthRequest {
    pub url: Option<String>,
    pub user_agent: Option<String>,
    pub basic_auth_username: Option<String>,
    pub basic_auth_password: Option<String>,
}

/// Body carrying a list of URLs.
#[derive(Debug, Default, Deserialize)]
pub struct UrlListRequest {
    #[serde(default)]
    pub urls: Vec<String>,
}

/// JSON response for `/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// JSON response for `/api/analyze`
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub analysis_time_ms: u64,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_remaining: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ValidateEntry {
    pub url: String,
    /// `blocked`, `accessible` or `inaccessible`
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ValidateSummary {
    pub accessible: usize,
    pub inaccessible: usize,
    pub total: usize,
}

/// JSON response for `/api/validate`
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub results: Vec<ValidateEntry>,
    pub summary: ValidateSummary,
}

#[derive(Debug, Serialize)]
pub struct LoopDetails {
    pub loop_urls: Vec<String>,
    pub loop_length: usize,
    pub loop_start_index: usize,
}

/// JSON response for `/api/detect-redirect-loop`
#[derive(Debug, Serialize)]
pub struct LoopResponse {
    pub url: String,
    pub loop_detected: bool,
    pub loop_details: Option<LoopDetails>,
    pub hop_limit_reached: bool,
    pub total_redirects: usize,
    pub redirect_chain: Vec<Hop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

/// One identity's outcome, without the full chain.
#[derive(Debug, Serialize)]
pub struct VariantSummary {
    pub redirects: usize,
    pub final_url: String,
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&VariantResult> for VariantSummary {
    fn from(variant: &VariantResult) -> Self {
        Self {
            redirects: variant.total_redirects,
            final_url: variant.final_url.clone(),
            status_code: variant.final_status,
            error: variant.chain.terminal_error.clone(),
        }
    }
}

/// JSON response for `/api/analyze/mobile-comparison`
#[derive(Debug, Serialize)]
pub struct MobileComparisonResponse {
    pub url: String,
    pub desktop: Option<VariantSummary>,
    pub mobile: Option<VariantSummary>,
    pub difference_detected: bool,
    pub redirect_counts_consistent: bool,
    pub timestamp: String,
}

/// One bot's row; unknown bots carry only `error`.
#[derive(Debug, Serialize)]
pub struct BotResult {
    pub bot_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// JSON response for `/api/analyze/bot-test`
#[derive(Debug, Serialize)]
pub struct BotTestResponse {
    pub url: String,
    pub bot_results: Vec<BotResult>,
    pub consistent_behavior: bool,
    pub available_bots: Vec<&'static str>,
    pub timestamp: String,
}

/// JSON response for `/api/analyze/with-auth`
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub url: String,
    pub auth_used: bool,
    /// Some hop answered 401
    pub auth_required: bool,
    pub redirect_chain: Vec<Hop>,
    pub final_url: String,
    pub total_redirects: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

/// JSON response for `/api/decode-shortener`
#[derive(Debug, Serialize)]
pub struct ShortenerResponse {
    pub original_url: String,
    pub expanded_url: String,
    pub is_url_shortener: bool,
    pub shortener_service: Option<&'static str>,
    pub redirect_count: usize,
    pub redirect_chain: Vec<Hop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

/// JSON response for `/api/bulk/analyze`
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub results: Vec<BulkOutcome>,
    pub processed: usize,
    pub timestamp: String,
}
