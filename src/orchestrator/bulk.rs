//! Independent URLs walked concurrently.

use std::future::Future;

use futures::future::join_all;
use serde::Serialize;

use crate::error_handling::AnalyzeError;
use crate::fetch::WalkOptions;
use crate::models::Chain;
use crate::orchestrator::analyze::analyze_url;
use crate::user_agent::RequestIdentity;

/// Outcome of one URL in a bulk walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BulkOutcome {
    /// Rejected by validation, nothing was sent
    Blocked { url: String, error: String },
    /// The walk ended with a terminal error
    Error { url: String, error: String },
    /// The walk completed
    Success {
        url: String,
        final_url: String,
        redirect_count: usize,
        total_time_ms: u64,
    },
}

impl BulkOutcome {
    pub fn url(&self) -> &str {
        match self {
            BulkOutcome::Blocked { url, .. }
            | BulkOutcome::Error { url, .. }
            | BulkOutcome::Success { url, .. } => url,
        }
    }
}

/// Validates and walks every URL concurrently.
///
/// Results come back in input order regardless of completion order.
pub async fn walk_many<S: AsRef<str>>(
    client: &reqwest::Client,
    urls: &[S],
    identity: &RequestIdentity,
    options: &WalkOptions,
) -> Vec<BulkOutcome> {
    outcomes_in_order(urls, |url| analyze_url(client, url, identity, options)).await
}

/// Runs `walk_one` for every URL concurrently and maps each result in input order.
pub(crate) async fn outcomes_in_order<'a, S, F, Fut>(urls: &'a [S], walk_one: F) -> Vec<BulkOutcome>
where
    S: AsRef<str>,
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = Result<Chain, AnalyzeError>>,
{
    let walks = urls.iter().map(|url| {
        let url = url.as_ref();
        let walk = walk_one(url);
        async move { bulk_outcome(url, walk.await) }
    });
    join_all(walks).await
}

/// Classifies one URL's walk result.
pub(crate) fn bulk_outcome(url: &str, result: Result<Chain, AnalyzeError>) -> BulkOutcome {
    match result {
        Err(AnalyzeError::ValidationRejected(reason)) => BulkOutcome::Blocked {
            url: url.to_string(),
            error: reason,
        },
        Ok(chain) => match chain.terminal_error.clone() {
            Some(error) => BulkOutcome::Error {
                url: url.to_string(),
                error,
            },
            None => BulkOutcome::Success {
                url: url.to_string(),
                final_url: chain.final_url_or(url).to_string(),
                redirect_count: chain.total_redirects(),
                total_time_ms: chain.hops.iter().map(|h| h.response_time_ms).sum(),
            },
        },
    }
}
