//! Configuration constants.
//!
//! Defaults for the walker, the HTTP surface and the rate limiter.

/// Maximum number of requests the walker issues for one chain
pub const DEFAULT_MAX_HOPS: usize = 15;

/// Per-hop request timeout in seconds.
/// The walker has no timeout of its own; this bounds a hop that never answers.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User-Agent used when a caller supplies none
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; RedirectAnalyzer/1.0)";

/// Maximum URL length (2048 characters), matching common browser/server limits
pub const MAX_URL_LENGTH: usize = 2048;

/// Maximum URLs accepted by one bulk call
pub const MAX_BULK_URLS: usize = 10;

/// Lifetime of a daily rate-limit bucket
pub const RATE_LIMIT_TTL_SECS: u64 = 86_400;

/// Default port for `serve`
pub const DEFAULT_SERVER_PORT: u16 = 8787;

// Cache bypass: every hop must reach the origin
pub const CACHE_CONTROL_NO_CACHE: &str = "no-cache, no-store, max-age=0";
pub const PRAGMA_NO_CACHE: &str = "no-cache";

/// Maximum URLs accepted by one `/api/validate` call
pub const MAX_VALIDATE_URLS: usize = 20;
