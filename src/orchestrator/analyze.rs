//! Validated single-URL walk.

use log::info;

use crate::error_handling::AnalyzeError;
use crate::fetch::{walk, WalkOptions};
use crate::models::Chain;
use crate::security::validate_url;
use crate::user_agent::RequestIdentity;

/// Validates `url` and, if it is safe, walks its redirect chain.
///
/// # Errors
///
/// Returns [`AnalyzeError::ValidationRejected`] without issuing any request when
/// the URL fails validation. Every other failure is carried in the returned
/// chain's `terminal_error`.
pub async fn analyze_url(
    client: &reqwest::Client,
    url: &str,
    identity: &RequestIdentity,
    options: &WalkOptions,
) -> Result<Chain, AnalyzeError> {
    let verdict = validate_url(url);
    if !verdict.valid {
        let reason = verdict.reason.unwrap_or_default();
        info!("Rejected {}: {}", url, reason);
        return Err(AnalyzeError::ValidationRejected(reason));
    }
    Ok(walk(client, url, identity, options).await)
}
