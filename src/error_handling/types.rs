//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors returned by the analysis entry points.
///
/// Only validation can reject a request outright; transport failures and hop-limit
/// exhaustion are carried inside the returned chain instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    /// The URL failed SSRF validation; no request was sent.
    #[error("{0}")]
    ValidationRejected(String),
}

/// Failure of the external rate-limit counter backend.
#[derive(Error, Debug)]
pub enum RateLimitStoreError {
    /// The backend could not be reached or answered with garbage.
    #[error("Rate limit store unavailable: {0}")]
    Unavailable(String),
}

/// Transport-level failure categories for a single hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Builder,
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "HTTP request timeout error",
            TransportErrorKind::Connect => "HTTP request connect error",
            TransportErrorKind::Request => "HTTP request error",
            TransportErrorKind::Body => "HTTP request body error",
            TransportErrorKind::Decode => "HTTP request decode error",
            TransportErrorKind::Builder => "HTTP request builder error",
            TransportErrorKind::Other => "HTTP request other error",
        }
    }
}
