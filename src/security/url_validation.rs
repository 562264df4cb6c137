//! URL validation and SSRF protection.
//!
//! Every URL supplied by a caller goes through [`validate_url`] before any outbound
//! request is issued. The check is purely syntactic: no DNS resolution happens here,
//! so a public name that later resolves to a private address is not caught.
//!
//! Blocked:
//! - Malformed URLs and non-HTTP/HTTPS schemes
//! - Cloud metadata endpoints and `localhost`
//! - Private/reserved IPv4 ranges (RFC 1918, loopback, link-local, CGNAT, multicast)
//! - Private IPv6 literals (loopback, ULA, link-local, multicast, v4-mapped private)
//! - Internal-only suffixes (`.internal`, `.corp`, `.home`, `.lan`, `.localhost`, `.local`)

use std::net::{Ipv4Addr, Ipv6Addr};

use url::{Host, Url};

use crate::models::ValidationVerdict;

const REASON_INVALID_FORMAT: &str = "Invalid URL format";
const REASON_SCHEME: &str = "Only HTTP/HTTPS schemes allowed";
const REASON_PRIVATE_IP: &str = "Private/reserved IP address not allowed";
const REASON_INTERNAL_DOMAIN: &str = "Internal domain not allowed";

/// Hostnames that are never fetched, compared case-insensitively.
const BLOCKED_HOSTS: &[&str] = &[
    "localhost",
    "metadata",
    "instance-data",
    "169.254.169.254",
    "metadata.google.internal",
    "metadata.gce.internal",
];

/// Suffixes reserved for private networks.
const INTERNAL_SUFFIXES: &[&str] = &[
    ".internal",
    ".corp",
    ".home",
    ".lan",
    ".localhost",
    ".local",
];

/// Classifies a candidate URL as safe to fetch or rejects it with a reason.
///
/// Deterministic and side-effect free.
///
/// # Examples
///
/// ```
/// use redirect_analyzer::validate_url;
///
/// assert!(validate_url("https://example.com/landing").valid);
///
/// let verdict = validate_url("http://192.168.1.1/admin");
/// assert!(!verdict.valid);
/// assert_eq!(
///     verdict.reason.as_deref(),
///     Some("Private/reserved IP address not allowed")
/// );
/// ```
pub fn validate_url(candidate: &str) -> ValidationVerdict {
    let url = match Url::parse(candidate) {
        Ok(url) => url,
        Err(_) => return ValidationVerdict::reject(REASON_INVALID_FORMAT),
    };

    if !matches!(url.scheme(), "http" | "https") {
        return ValidationVerdict::reject(REASON_SCHEME);
    }

    let host = match url.host() {
        Some(host) => host,
        None => return ValidationVerdict::reject(REASON_INVALID_FORMAT),
    };

    let hostname = match &host {
        Host::Domain(domain) => domain.to_lowercase(),
        Host::Ipv4(ip) => ip.to_string(),
        Host::Ipv6(ip) => ip.to_string(),
    };

    if BLOCKED_HOSTS.contains(&hostname.as_str()) {
        return ValidationVerdict::reject(format!("Access to {} not allowed", hostname));
    }

    let private = match host {
        Host::Ipv4(ip) => is_private_ipv4(ip),
        Host::Ipv6(ip) => is_private_ipv6(ip),
        Host::Domain(_) => false,
    };
    if private {
        return ValidationVerdict::reject(REASON_PRIVATE_IP);
    }

    if INTERNAL_SUFFIXES
        .iter()
        .any(|suffix| hostname.ends_with(suffix))
    {
        return ValidationVerdict::reject(REASON_INTERNAL_DOMAIN);
    }

    ValidationVerdict::accept()
}

/// Checks if an IPv4 address is private, reserved or otherwise not routable.
///
/// Ranges:
/// - 0.0.0.0/8 (this network)
/// - 10.0.0.0/8
/// - 127.0.0.0/8 (loopback)
/// - 169.254.0.0/16 (link-local)
/// - 172.16.0.0/12
/// - 192.168.0.0/16
/// - 100.64.0.0/10 (carrier-grade NAT)
/// - 224.0.0.0 and above (multicast, reserved, broadcast)
pub(crate) fn is_private_ipv4(ip: Ipv4Addr) -> bool {
    let octets = ip.octets();

    octets[0] == 0
        || octets[0] == 10
        || octets[0] == 127
        || (octets[0] == 169 && octets[1] == 254)
        || (octets[0] == 172 && (16..=31).contains(&octets[1]))
        || (octets[0] == 192 && octets[1] == 168)
        || (octets[0] == 100 && (64..=127).contains(&octets[1]))
        || octets[0] >= 224
}

/// Checks if an IPv6 address is private/internal (RFC 4193, RFC 4291).
///
/// Private ranges:
/// - :: and ::1 (unspecified, loopback)
/// - fc00::/7 (unique local addresses)
/// - fe80::/10 (link-local)
/// - ff00::/8 (multicast)
/// - ::ffff:0:0/96 wrapping a private IPv4 address
pub(crate) fn is_private_ipv6(ip: Ipv6Addr) -> bool {
    if ip.is_loopback() || ip.is_unspecified() {
        return true;
    }

    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_private_ipv4(v4);
    }

    let first = ip.segments()[0];
    (first & 0xfe00) == 0xfc00 || (first & 0xffc0) == 0xfe80 || (first & 0xff00) == 0xff00
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(url: &str) -> Option<String> {
        validate_url(url).reason
    }

    #[test]
    fn test_validate_url_public_urls() {
        assert!(validate_url("https://example.com").valid);
        assert!(validate_url("http://example.com").valid);
        assert!(validate_url("https://subdomain.example.com").valid);
        assert!(validate_url("https://example.com:8080").valid);
        assert!(validate_url("https://example.com/path?query=value").valid);
        assert_eq!(validate_url("https://example.com").reason, None);
    }

    #[test]
    fn test_validate_url_public_ips() {
        assert!(validate_url("http://192.0.2.1").valid);
        assert!(validate_url("http://8.8.8.8").valid);
        assert!(validate_url("http://1.1.1.1").valid);
        assert!(validate_url("http://100.63.255.255").valid);
        assert!(validate_url("http://100.128.0.1").valid);
        assert!(validate_url("http://223.255.255.255").valid);
    }

    #[test]
    fn test_validate_url_invalid_format() {
        assert_eq!(reason("not-a-url").as_deref(), Some(REASON_INVALID_FORMAT));
        assert_eq!(reason("").as_deref(), Some(REASON_INVALID_FORMAT));
        assert_eq!(reason("http://").as_deref(), Some(REASON_INVALID_FORMAT));
    }

    #[test]
    fn test_validate_url_unsafe_schemes() {
        for url in [
            "file:///etc/passwd",
            "ftp://example.com",
            "gopher://example.com",
            "javascript:alert(1)",
            "data:text/html,<script>alert(1)</script>",
        ] {
            assert_eq!(reason(url).as_deref(), Some(REASON_SCHEME), "{url}");
        }
    }

    #[test]
    fn test_validate_url_blocked_hosts() {
        assert_eq!(
            reason("http://localhost:8080/").as_deref(),
            Some("Access to localhost not allowed")
        );
        assert_eq!(
            reason("http://LOCALHOST/").as_deref(),
            Some("Access to localhost not allowed")
        );
        assert_eq!(
            reason("http://metadata/computeMetadata/v1/").as_deref(),
            Some("Access to metadata not allowed")
        );
        assert_eq!(
            reason("http://instance-data/latest").as_deref(),
            Some("Access to instance-data not allowed")
        );
        assert_eq!(
            reason("http://169.254.169.254/latest/meta-data/").as_deref(),
            Some("Access to 169.254.169.254 not allowed")
        );
        assert_eq!(
            reason("http://Metadata.Google.Internal/").as_deref(),
            Some("Access to metadata.google.internal not allowed")
        );
        assert_eq!(
            reason("http://metadata.gce.internal/").as_deref(),
            Some("Access to metadata.gce.internal not allowed")
        );
    }

    #[test]
    fn test_validate_url_private_ipv4() {
        for url in [
            "http://0.0.0.0",
            "http://10.0.0.1",
            "http://127.0.0.1:8080",
            "http://169.254.1.1",
            "http://172.16.0.1",
            "http://172.31.255.255",
            "http://192.168.1.1",
            "http://100.64.0.1",
            "http://100.127.255.255",
            "http://224.0.0.1",
            "http://255.255.255.255",
        ] {
            assert_eq!(reason(url).as_deref(), Some(REASON_PRIVATE_IP), "{url}");
        }
    }

    #[test]
    fn test_validate_url_private_ipv6() {
        for url in [
            "http://[::1]",
            "http://[fc00::1]",
            "http://[fe80::1]",
            "http://[ff02::1]",
            "http://[::ffff:10.0.0.1]",
        ] {
            assert_eq!(reason(url).as_deref(), Some(REASON_PRIVATE_IP), "{url}");
        }
        assert!(validate_url("http://[2001:db8::1]").valid);
    }

    #[test]
    fn test_validate_url_internal_suffixes() {
        for url in [
            "http://db.internal",
            "http://intranet.corp/",
            "http://router.home",
            "http://nas.lan",
            "http://app.localhost",
            "http://printer.local/status",
        ] {
            assert_eq!(
                reason(url).as_deref(),
                Some(REASON_INTERNAL_DOMAIN),
                "{url}"
            );
        }
        // Suffix must be a label boundary match, not a substring
        assert!(validate_url("https://corp.example.com").valid);
        assert!(validate_url("https://example.localhost.com").valid);
    }

    #[test]
    fn test_validate_url_is_deterministic() {
        let first = validate_url("http://10.1.2.3/");
        let second = validate_url("http://10.1.2.3/");
        assert_eq!(first, second);
    }

    #[test]
    fn test_is_private_ipv4() {
        assert!(is_private_ipv4(Ipv4Addr::new(127, 0, 0, 1)));
        assert!(is_private_ipv4(Ipv4Addr::new(100, 64, 0, 0)));
        assert!(is_private_ipv4(Ipv4Addr::new(239, 1, 1, 1)));
        assert!(is_private_ipv4(Ipv4Addr::new(240, 0, 0, 1)));

        assert!(!is_private_ipv4(Ipv4Addr::new(8, 8, 8, 8)));
        assert!(!is_private_ipv4(Ipv4Addr::new(172, 32, 0, 1)));
        assert!(!is_private_ipv4(Ipv4Addr::new(169, 253, 1, 1)));
        assert!(!is_private_ipv4(Ipv4Addr::new(203, 0, 113, 1)));
    }

    #[test]
    fn test_is_private_ipv6() {
        assert!(is_private_ipv6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1)));
        assert!(is_private_ipv6(Ipv6Addr::new(0xfd12, 0, 0, 0, 0, 0, 0, 1)));
        assert!(is_private_ipv6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1)));
        assert!(!is_private_ipv6(Ipv6Addr::new(
            0x2001, 0xdb8, 0, 0, 0, 0, 0, 1
        )));
        assert!(!is_private_ipv6(Ipv6Addr::new(
            0, 0, 0, 0, 0, 0xffff, 0x0808, 0x0808
        )));
    }
}
