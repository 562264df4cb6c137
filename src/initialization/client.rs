//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;
use crate::error_handling::InitializationError;

/// Initializes the HTTP client used to walk redirect chains.
///
/// Creates a `reqwest::Client` with:
/// - Redirect following disabled, so every 3xx is returned as-is
/// - A per-request timeout from `config.timeout_seconds`
/// - The configured default User-Agent (identities override it per request)
///
/// The client is cheap to clone and is shared by every walk.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_redirect_client(config: &Config) -> Result<reqwest::Client, InitializationError> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}
