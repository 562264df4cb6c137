//! URL-list handlers.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use futures::future::join_all;

use super::{enforce_rate_limit, timestamp};
use crate::config::{MAX_BULK_URLS, MAX_VALIDATE_URLS};
use crate::error_handling::AnalyzeError;
use crate::orchestrator::{analyze_url, walk_many};
use crate::rate_limit::EndpointClass;
use crate::server::types::{
    ApiError, AppState, BulkResponse, UrlListRequest, ValidateEntry, ValidateResponse,
    ValidateSummary,
};
use crate::user_agent::RequestIdentity;

/// `POST /api/bulk/analyze`
pub async fn bulk_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UrlListRequest>,
) -> Result<Json<BulkResponse>, ApiError> {
    enforce_rate_limit(&state, &headers, EndpointClass::Bulk)?;
    if body.urls.is_empty() || body.urls.len() > MAX_BULK_URLS {
        return Err(ApiError::InvalidRequest {
            error: "Invalid request".to_string(),
            message: format!("Provide 1-{} URLs for bulk analysis", MAX_BULK_URLS),
        });
    }

    let identity = RequestIdentity::new("bulk", state.user_agent.as_str());
    let results = walk_many(&state.client, &body.urls, &identity, &state.options).await;

    Ok(Json(BulkResponse {
        processed: results.len(),
        results,
        timestamp: timestamp(),
    }))
}

/// `POST /api/validate`
///
/// Safety-checks up to [`MAX_VALIDATE_URLS`] URLs and walks the safe ones to see
/// whether they end on a 2xx.
pub async fn validate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UrlListRequest>,
) -> Result<Json<ValidateResponse>, ApiError> {
    enforce_rate_limit(&state, &headers, EndpointClass::Basic)?;

    let identity = state.identity(None);
    let checks = body
        .urls
        .iter()
        .take(MAX_VALIDATE_URLS)
        .map(|url| {
            let identity = &identity;
            let state = &state;
            async move {
                let outcome = analyze_url(&state.client, url, identity, &state.options).await;
                validate_entry(url, outcome)
            }
        });
    let results = join_all(checks).await;

    let accessible = results.iter().filter(|r| r.status == "accessible").count();
    Ok(Json(ValidateResponse {
        summary: ValidateSummary {
            accessible,
            inaccessible: results.len() - accessible,
            total: results.len(),
        },
        results,
    }))
}

fn validate_entry(
    url: &str,
    outcome: Result<crate::models::Chain, AnalyzeError>,
) -> ValidateEntry {
    let chain = match outcome {
        Ok(chain) => chain,
        Err(AnalyzeError::ValidationRejected(reason)) => {
            return ValidateEntry {
                url: url.to_string(),
                status: "blocked",
                status_code: None,
                final_url: None,
                error: Some(reason),
            }
        }
    };

    let status_code = chain.final_status();
    let (status, error) = match (&chain.terminal_error, status_code) {
        (Some(error), _) => ("inaccessible", Some(error.clone())),
        (None, Some(code)) if (200..300).contains(&code) => ("accessible", None),
        (None, Some(code)) => ("inaccessible", Some(format!("HTTP {code}"))),
        (None, None) => ("inaccessible", None),
    };

    ValidateEntry {
        url: url.to_string(),
        status,
        status_code,
        final_url: chain.final_url().map(str::to_string),
        error,
    }
}
