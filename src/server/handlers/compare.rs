//! Multi-identity handlers.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use super::{enforce_rate_limit, ensure_safe, require_url, timestamp};
use crate::orchestrator::{compare, compare_desktop_mobile};
use crate::rate_limit::EndpointClass;
use crate::server::types::{
    ApiError, AppState, BotResult, BotTestRequest, BotTestResponse, MobileComparisonResponse,
    UrlRequest, VariantSummary,
};
use crate::user_agent::{available_bots, bot_identities, RequestIdentity};

/// `POST /api/analyze/mobile-comparison`
pub async fn mobile_comparison_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UrlRequest>,
) -> Result<Json<MobileComparisonResponse>, ApiError> {
    enforce_rate_limit(&state, &headers, EndpointClass::Basic)?;
    let url = require_url(body.url)?;
    ensure_safe(&url)?;

    let result = compare_desktop_mobile(&state.client, &url, &state.options).await;

    Ok(Json(MobileComparisonResponse {
        desktop: result.variant("desktop").map(VariantSummary::from),
        mobile: result.variant("mobile").map(VariantSummary::from),
        difference_detected: !result.consistent,
        redirect_counts_consistent: result.redirect_counts_consistent,
        url: result.url,
        timestamp: timestamp(),
    }))
}

/// `POST /api/analyze/bot-test`
///
/// Unknown bot names come back as rows carrying only an error; they do not fail
/// the call.
pub async fn bot_test_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<BotTestRequest>,
) -> Result<Json<BotTestResponse>, ApiError> {
    enforce_rate_limit(&state, &headers, EndpointClass::Basic)?;
    let url = require_url(body.url)?;
    ensure_safe(&url)?;

    let names = body
        .bots
        .unwrap_or_else(|| vec!["googlebot".to_string(), "bingbot".to_string()]);
    let (identities, _) = bot_identities(&names);
    let result = compare(&state.client, &url, &identities, &state.options).await;

    let bot_results = names
        .iter()
        .map(|name| {
            let variant = RequestIdentity::bot(name)
                .and_then(|identity| result.variant(&identity.label));
            match variant {
                Some(variant) => BotResult {
                    bot_name: variant.identity_label.clone(),
                    final_url: Some(variant.final_url.clone()),
                    redirect_count: Some(variant.total_redirects),
                    status_code: variant.final_status,
                    error: variant.chain.terminal_error.clone(),
                },
                None => BotResult {
                    bot_name: name.clone(),
                    final_url: None,
                    redirect_count: None,
                    status_code: None,
                    error: Some(format!(
                        "Unknown bot. Available: {}",
                        available_bots().join(", ")
                    )),
                },
            }
        })
        .collect();

    Ok(Json(BotTestResponse {
        url,
        bot_results,
        consistent_behavior: result.consistent,
        available_bots: available_bots(),
        timestamp: timestamp(),
    }))
}
