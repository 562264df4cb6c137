//! Transport error categorization.

use super::types::TransportErrorKind;

/// Categorizes a `reqwest::Error` raised while sending a hop request.
///
/// Timeouts are checked before connect errors because a connect timeout reports
/// both.
pub fn categorize_transport_error(error: &reqwest::Error) -> TransportErrorKind {
    if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else if error.is_builder() {
        TransportErrorKind::Builder
    } else if error.is_body() {
        TransportErrorKind::Body
    } else if error.is_decode() {
        TransportErrorKind::Decode
    } else if error.is_request() {
        TransportErrorKind::Request
    } else {
        TransportErrorKind::Other
    }
}

/// Message stored in a chain's `terminal_error` for a failed hop.
///
/// Walks the source chain so the root cause (DNS, refused, ...) is visible,
/// not just reqwest's "error sending request" wrapper.
pub fn transport_error_message(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
