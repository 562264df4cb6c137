//! Error handling.
//!
//! This module provides:
//! - Typed errors for initialization, analysis entry points and the rate-limit store
//! - Categorization of hop transport failures
//!
//! Error classes:
//! - **ValidationRejected**: raised before any network I/O, never retried
//! - **Transport failure**: recorded into the chain's `terminal_error`
//! - **Hop limit**: recorded like a transport failure, distinguished by message
//! - **Redirect without Location**: a normal terminal state, not an error

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_transport_error, transport_error_message};
pub use types::{AnalyzeError, InitializationError, RateLimitStoreError, TransportErrorKind};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_transport_error_kind_strings_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for kind in TransportErrorKind::iter() {
            assert!(seen.insert(kind.as_str()), "duplicate label for {:?}", kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_analyze_error_display_is_reason() {
        let err = AnalyzeError::ValidationRejected("Internal domain not allowed".to_string());
        assert_eq!(err.to_string(), "Internal domain not allowed");
    }

    #[tokio::test]
    async fn test_categorize_connect_error() {
        // Port 9 on loopback is closed in test environments
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap();
        let err = client
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .expect_err("nothing listens on the discard port");
        let kind = categorize_transport_error(&err);
        assert!(
            matches!(kind, TransportErrorKind::Connect | TransportErrorKind::Timeout),
            "unexpected kind {:?}",
            kind
        );
        assert!(!transport_error_message(&err).is_empty());
    }
}
