//! Core data model shared by the walker, the heuristics and the HTTP surface.
//!
//! A [`Chain`] owns its [`Hop`]s in traversal order. Both types serialize to the
//! wire shape consumed by clients (`step`, `url`, `status_code`, ... and a top-level
//! `error` that is only present when traversal stopped abnormally).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Message stored in [`Chain::terminal_error`] when the hop budget is exhausted.
pub const MAX_REDIRECTS_REACHED: &str = "Maximum redirect limit reached";

/// Semantic class of a 3xx status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedirectKind {
    /// 301
    #[serde(rename = "Permanent Redirect")]
    Permanent,
    /// 302
    #[serde(rename = "Temporary Redirect")]
    Temporary,
    /// 303
    #[serde(rename = "See Other")]
    SeeOther,
    /// 307
    #[serde(rename = "Temporary Redirect (Preserve Method)")]
    TemporaryPreserve,
    /// 308
    #[serde(rename = "Permanent Redirect (Preserve Method)")]
    PermanentPreserve,
    /// Any other 3xx (300, 304, 305, ...)
    #[serde(rename = "Redirect")]
    Other,
}

impl RedirectKind {
    /// Maps a redirect status code to its kind.
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            301 => RedirectKind::Permanent,
            302 => RedirectKind::Temporary,
            303 => RedirectKind::SeeOther,
            307 => RedirectKind::TemporaryPreserve,
            308 => RedirectKind::PermanentPreserve,
            _ => RedirectKind::Other,
        }
    }

    /// Whether the redirect is cacheable/permanent (301, 308).
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            RedirectKind::Permanent | RedirectKind::PermanentPreserve
        )
    }
}

/// One HTTP request/response pair within a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    /// 1-based position of the hop in the chain
    pub step: usize,
    /// URL that was requested for this hop
    #[serde(rename = "url")]
    pub requested_url: String,
    pub status_code: u16,
    pub is_redirect: bool,
    pub response_time_ms: u64,
    /// Response headers, lowercase names; repeated headers are joined with ", "
    #[serde(rename = "headers")]
    pub response_headers: BTreeMap<String, String>,
    #[serde(
        rename = "redirect_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub redirect_kind: Option<RedirectKind>,
    /// Absolute URL the Location header resolved to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
}

impl Hop {
    /// Hostname of the requested URL, lowercased, if it parses.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.requested_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
    }

    /// Scheme of the requested URL, lowercased, if it parses.
    pub fn scheme(&self) -> Option<String> {
        url::Url::parse(&self.requested_url)
            .ok()
            .map(|u| u.scheme().to_string())
    }

    pub fn is_plain_http(&self) -> bool {
        self.scheme().as_deref() == Some("http")
    }
}

/// Ordered sequence of hops produced by following redirects from a start URL.
///
/// `terminal_error` is set when the hop limit was exhausted or a transport error
/// interrupted traversal; the hops collected up to that point are always kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    #[serde(rename = "chain")]
    pub hops: Vec<Hop>,
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub terminal_error: Option<String>,
}

impl Chain {
    /// Number of hops that answered with a 3xx status.
    pub fn total_redirects(&self) -> usize {
        self.hops.iter().filter(|h| h.is_redirect).count()
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// The URL the chain ends on: the last hop's `next_url`, else its requested URL.
    ///
    /// Returns `None` for an empty chain (first request failed at transport level).
    pub fn final_url(&self) -> Option<&str> {
        self.hops
            .last()
            .map(|h| h.next_url.as_deref().unwrap_or(&h.requested_url))
    }

    /// Like [`Chain::final_url`] but falls back to `start_url` for an empty chain.
    pub fn final_url_or<'a>(&'a self, start_url: &'a str) -> &'a str {
        self.final_url().unwrap_or(start_url)
    }

    /// Status code of the last hop, if any.
    pub fn final_status(&self) -> Option<u16> {
        self.hops.last().map(|h| h.status_code)
    }

    /// True when traversal was cut by the hop limit.
    pub fn hit_redirect_limit(&self) -> bool {
        self.terminal_error.as_deref() == Some(MAX_REDIRECTS_REACHED)
    }

    /// True when every requested URL in the chain uses https.
    pub fn https_only(&self) -> bool {
        self.hops
            .iter()
            .all(|h| h.scheme().as_deref() == Some("https"))
    }

    /// Iterates over every requested URL in traversal order.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.hops.iter().map(|h| h.requested_url.as_str())
    }
}

/// Outcome of URL safety validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationVerdict {
    pub fn accept() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}
