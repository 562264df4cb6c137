//! Same URL, several identities, walked concurrently.

use futures::future::join_all;
use log::debug;
use serde::Serialize;

use crate::fetch::{walk, WalkOptions};
use crate::models::Chain;
use crate::user_agent::RequestIdentity;

/// One identity's walk.
#[derive(Debug, Clone, Serialize)]
pub struct VariantResult {
    pub identity_label: String,
    /// Final URL of the chain, or the start URL when the chain is empty
    pub final_url: String,
    pub total_redirects: usize,
    /// Status of the last hop; `None` when the first request failed
    pub final_status: Option<u16>,
    pub chain: Chain,
}

/// Joined outcome of a multi-identity comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub url: String,
    /// Variants in the order the identities were given
    pub variants: Vec<VariantResult>,
    /// Every variant ended on the exact same URL
    pub consistent: bool,
    /// Every variant saw the same number of redirects
    pub redirect_counts_consistent: bool,
}

impl ComparisonResult {
    pub fn variant(&self, label: &str) -> Option<&VariantResult> {
        self.variants.iter().find(|v| v.identity_label == label)
    }
}

fn all_equal<T: PartialEq>(mut values: impl Iterator<Item = T>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}

/// Walks `start_url` once per identity, all concurrently, and compares outcomes.
///
/// Every variant is awaited; a failed walk is kept with its `terminal_error`.
/// Final URLs are compared as exact strings, so a trailing slash counts as a
/// difference. The caller validates `start_url` first.
pub async fn compare(
    client: &reqwest::Client,
    start_url: &str,
    identities: &[RequestIdentity],
    options: &WalkOptions,
) -> ComparisonResult {
    let walks = identities.iter().map(|identity| async move {
        let chain = walk(client, start_url, identity, options).await;
        VariantResult {
            identity_label: identity.label.clone(),
            final_url: chain.final_url_or(start_url).to_string(),
            total_redirects: chain.total_redirects(),
            final_status: chain.final_status(),
            chain,
        }
    });
    let variants = join_all(walks).await;

    let consistent = all_equal(variants.iter().map(|v| v.final_url.as_str()));
    let redirect_counts_consistent = all_equal(variants.iter().map(|v| v.total_redirects));
    debug!(
        "Compared {} identities for {}: consistent={}",
        variants.len(),
        start_url,
        consistent
    );

    ComparisonResult {
        url: start_url.to_string(),
        variants,
        consistent,
        redirect_counts_consistent,
    }
}

/// Desktop vs mobile comparison.
pub async fn compare_desktop_mobile(
    client: &reqwest::Client,
    start_url: &str,
    options: &WalkOptions,
) -> ComparisonResult {
    compare(
        client,
        start_url,
        &[RequestIdentity::desktop(), RequestIdentity::mobile()],
        options,
    )
    .await
}
