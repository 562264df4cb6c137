//! redirect_analyzer library: hop-by-hop HTTP redirect chain analysis
//!
//! This library walks redirect chains manually, one request per hop, recording
//! each hop's status, latency and headers. On top of the recorded chain it offers
//! SSRF-safe URL validation, loop detection, safety/affiliate/tracking heuristics
//! and concurrent comparison of the same walk under several request identities.
//!
//! # Example
//!
//! ```no_run
//! use redirect_analyzer::{analyze_url, init_redirect_client, AnalysisReport, Config, RequestIdentity};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = init_redirect_client(&config)?;
//!
//! let chain = analyze_url(
//!     &client,
//!     "https://bit.ly/example",
//!     &RequestIdentity::default(),
//!     &config.walk_options(),
//! )
//! .await?;
//!
//! let report = AnalysisReport::build("https://bit.ly/example", &chain);
//! println!("{} redirects, safety score {}", report.total_redirects, report.safety_score);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod analysis;
mod app;
pub mod config;
mod error_handling;
mod fetch;
pub mod initialization;
mod loop_detection;
mod models;
mod orchestrator;
pub mod rate_limit;
mod security;
pub mod server;
mod user_agent;

// Re-export public API
pub use analysis::{AnalysisReport, PerformanceMetrics, ThreatLevel};
pub use app::normalize_url;
pub use config::{Cli, Command, Config, LogFormat, LogLevel};
pub use error_handling::{AnalyzeError, InitializationError, RateLimitStoreError};
pub use fetch::{walk, WalkOptions};
pub use initialization::{init_logger_with, init_redirect_client};
pub use loop_detection::{detect_loop, LoopReport};
pub use models::{Chain, Hop, RedirectKind, ValidationVerdict, MAX_REDIRECTS_REACHED};
pub use orchestrator::{
    analyze_url, compare, compare_desktop_mobile, walk_many, BulkOutcome, ComparisonResult,
    VariantResult,
};
pub use security::validate_url;
pub use user_agent::{
    available_bots, bot_identities, BasicAuth, RequestIdentity, BOT_USER_AGENTS,
    DESKTOP_USER_AGENT, MOBILE_USER_AGENT,
};
