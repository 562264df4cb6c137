//! Single hop tracing.

use std::collections::BTreeMap;
use std::time::Instant;

use reqwest::header::LOCATION;

use crate::fetch::request::{collect_headers, HopHeaders};
use crate::user_agent::RequestIdentity;

/// Raw observation of one request issued with redirect following disabled.
#[derive(Debug)]
pub(crate) struct HopResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// Raw `Location` header value, unresolved
    pub location: Option<String>,
    pub elapsed_ms: u64,
}

/// Issues one GET and records status, headers and wall-clock latency.
///
/// Latency covers the request up to the response head; the body is never read.
/// The client must have been built with `redirect::Policy::none()`.
pub(crate) async fn trace_step(
    client: &reqwest::Client,
    url: &str,
    identity: &RequestIdentity,
) -> Result<HopResponse, reqwest::Error> {
    let request = HopHeaders::apply_to_request_builder(client.get(url), identity);

    let started = Instant::now();
    let response = request.send().await?;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let location = response
        .headers()
        .get(LOCATION)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).trim().to_string())
        .filter(|value| !value.is_empty());

    Ok(HopResponse {
        status_code: response.status().as_u16(),
        headers: collect_headers(response.headers()),
        location,
        elapsed_ms,
    })
}
