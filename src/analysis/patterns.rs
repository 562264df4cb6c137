//! Fixed pattern tables and URL classifiers.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::models::Chain;

/// Domains that mark an affiliate funnel or affiliate network.
static AFFILIATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)amazon.*[?&]tag=",
        r"(?i)amzn\.to",
        r"(?i)affiliate",
        r"(?i)aff_",
        r"(?i)clickbank",
        r"(?i)shareasale",
        r"(?i)\bcj\.com",
        r"(?i)jdoqocy\.com",
        r"(?i)tkqlhce\.com",
        r"(?i)partner",
        r"(?i)[?&]ref=",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Query-parameter markers of campaign or ad-click tracking.
const TRACKING_MARKERS: &[&str] = &["utm_", "fbclid", "gclid", "msclkid", "_ga=", "mc_"];

/// TLDs heavily abused for throwaway domains.
const SUSPICIOUS_TLDS: &[&str] = &[".tk", ".ml", ".ga", ".cf", ".gq"];

/// Known URL shortener services.
pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "t.co",
    "goo.gl",
    "ow.ly",
    "buff.ly",
    "is.gd",
    "bl.ink",
    "rebrand.ly",
    "short.io",
    "tiny.cc",
    "shorturl.at",
    "clk.sh",
    "cutt.ly",
    "soo.gd",
    "qr.ae",
];

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// Returns the shortener service a host belongs to (exact match or subdomain).
pub fn shortener_for_host(host: &str) -> Option<&'static str> {
    let host = host.to_lowercase();
    SHORTENER_DOMAINS
        .iter()
        .copied()
        .find(|s| host == *s || host.ends_with(&format!(".{s}")))
}

/// Returns the shortener service a URL points at, if any.
pub fn shortener_service(url: &str) -> Option<&'static str> {
    host_of(url).and_then(|host| shortener_for_host(&host))
}

fn is_suspicious_host(host: &str) -> bool {
    SUSPICIOUS_TLDS.iter().any(|tld| host.ends_with(tld)) || shortener_for_host(host).is_some()
}

fn all_urls<'a>(original_url: &'a str, chain: &'a Chain) -> impl Iterator<Item = &'a str> {
    std::iter::once(original_url).chain(chain.urls())
}

/// True if the original URL or any hop URL matches an affiliate marker.
pub fn is_affiliate(original_url: &str, chain: &Chain) -> bool {
    all_urls(original_url, chain)
        .any(|url| AFFILIATE_PATTERNS.iter().any(|pattern| pattern.is_match(url)))
}

/// True if the original URL or any hop URL carries a tracking query parameter.
///
/// Only the query string is inspected when the URL parses, so paths such as
/// `/mc_donalds` do not count.
pub fn is_tracking(original_url: &str, chain: &Chain) -> bool {
    all_urls(original_url, chain).any(|url| {
        let haystack = match Url::parse(url) {
            Ok(parsed) => parsed.query().unwrap_or_default().to_lowercase(),
            Err(_) => url.to_lowercase(),
        };
        TRACKING_MARKERS
            .iter()
            .any(|marker| haystack.contains(marker))
    })
}

/// Distinct hop hostnames on a suspicious TLD or a known shortener, in first-seen order.
pub fn suspicious_domains(chain: &Chain) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for host in chain.hops.iter().filter_map(|h| h.host()) {
        if is_suspicious_host(&host) && !found.contains(&host) {
            found.push(host);
        }
    }
    found
}

/// True if any hop host is a known shortener.
pub fn uses_shortener(chain: &Chain) -> bool {
    chain
        .hops
        .iter()
        .filter_map(|h| h.host())
        .any(|host| shortener_for_host(&host).is_some())
}
