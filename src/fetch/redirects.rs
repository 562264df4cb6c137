//! HTTP redirect chain walking.
//!
//! Redirects are followed manually, one request per hop, so every intermediate
//! status code, header set and latency is recorded. The walk is total: it always
//! returns a [`Chain`], encoding hop-limit exhaustion and transport failures in
//! `terminal_error` alongside the hops collected so far.

use log::{debug, warn};
use reqwest::Url;

use crate::config::DEFAULT_MAX_HOPS;
use crate::error_handling::{categorize_transport_error, transport_error_message};
use crate::fetch::step::trace_step;
use crate::models::{Chain, Hop, RedirectKind, MAX_REDIRECTS_REACHED};
use crate::security::validate_url;
use crate::user_agent::RequestIdentity;

/// Knobs for a single walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Maximum number of requests issued for one chain
    pub max_hops: usize,
    /// Validate every redirect target before following it.
    ///
    /// Off by default: only the start URL is validated by callers, so a public
    /// URL may redirect into a private address.
    pub revalidate_hops: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
            revalidate_hops: false,
        }
    }
}

/// Resolves a `Location` value against the URL that returned it.
fn resolve_location(current: &str, location: &str) -> Result<String, url::ParseError> {
    let base = Url::parse(current)?;
    Ok(base.join(location)?.to_string())
}

/// Walks the redirect chain starting at `start_url`.
///
/// Each iteration issues one GET with the identity's headers:
/// - non-3xx response: the hop is recorded and the walk ends
/// - 3xx without `Location`: the hop is recorded and the walk ends (not an error)
/// - 3xx with `Location`: the target is resolved against the current URL, tagged
///   with its [`RedirectKind`], and becomes the next request
///
/// At most `options.max_hops` requests are issued. Running out of hops sets
/// `terminal_error` to [`MAX_REDIRECTS_REACHED`]; a transport error sets it to the
/// error message. In both cases the hops collected so far are returned.
///
/// The caller is responsible for validating `start_url` first.
pub async fn walk(
    client: &reqwest::Client,
    start_url: &str,
    identity: &RequestIdentity,
    options: &WalkOptions,
) -> Chain {
    let mut chain = Chain::default();
    let mut current = start_url.to_string();
    let mut hop_index = 0;

    while hop_index < options.max_hops {
        let response = match trace_step(client, &current, identity).await {
            Ok(response) => response,
            Err(e) => {
                let kind = categorize_transport_error(&e);
                warn!(
                    "{} at hop {} for {} ({}): {}",
                    kind,
                    chain.len() + 1,
                    current,
                    identity.label,
                    e
                );
                chain.terminal_error = Some(transport_error_message(&e));
                return chain;
            }
        };

        let is_redirect = (300..400).contains(&response.status_code);
        debug!(
            "hop {} {} -> {} in {}ms",
            chain.len() + 1,
            current,
            response.status_code,
            response.elapsed_ms
        );

        let mut hop = Hop {
            step: chain.len() + 1,
            requested_url: current.clone(),
            status_code: response.status_code,
            is_redirect,
            response_time_ms: response.elapsed_ms,
            response_headers: response.headers,
            redirect_kind: None,
            next_url: None,
        };

        if !is_redirect {
            chain.hops.push(hop);
            return chain;
        }

        let Some(location) = response.location else {
            warn!(
                "Redirect status {} for {} but no Location header",
                hop.status_code, current
            );
            chain.hops.push(hop);
            return chain;
        };

        let next_url = match resolve_location(&current, &location) {
            Ok(next_url) => next_url,
            Err(e) => {
                warn!("Unresolvable Location '{}' from {}: {}", location, current, e);
                chain.hops.push(hop);
                chain.terminal_error = Some(format!("Invalid redirect location '{location}': {e}"));
                return chain;
            }
        };

        hop.redirect_kind = Some(RedirectKind::from_status(hop.status_code));
        hop.next_url = Some(next_url.clone());
        chain.hops.push(hop);

        if options.revalidate_hops {
            let verdict = validate_url(&next_url);
            if !verdict.valid {
                let reason = verdict.reason.unwrap_or_default();
                warn!("Refusing to follow {} -> {}: {}", current, next_url, reason);
                chain.terminal_error = Some(format!("Redirect target rejected: {reason}"));
                return chain;
            }
        }

        current = next_url;
        hop_index += 1;
    }

    debug!(
        "Hop limit {} reached for {} ({})",
        options.max_hops, start_url, identity.label
    );
    chain.terminal_error = Some(MAX_REDIRECTS_REACHED.to_string());
    chain
}

#[cfg(test)]
mod tests {
    use super::resolve_location;

    #[test]
    fn test_resolve_location_relative_path() {
        assert_eq!(
            resolve_location("https://example.com/a/b", "c").unwrap(),
            "https://example.com/a/c"
        );
        assert_eq!(
            resolve_location("https://example.com/a/b", "/root?x=1").unwrap(),
            "https://example.com/root?x=1"
        );
    }

    #[test]
    fn test_resolve_location_absolute_and_protocol_relative() {
        assert_eq!(
            resolve_location("http://example.com/", "https://other.example/x").unwrap(),
            "https://other.example/x"
        );
        assert_eq!(
            resolve_location("https://example.com/", "//cdn.example/y").unwrap(),
            "https://cdn.example/y"
        );
    }

    #[test]
    fn test_resolve_location_bad_base_fails() {
        assert!(resolve_location("not a url", "/x").is_err());
    }
}
