//! Heuristics over a finished chain.
//!
//! Everything here is a pure function of the chain (and the URL the caller asked
//! for): affiliate and tracking detection, suspicious domains, the composite
//! safety score and latency metrics. No network access.

mod metrics;
mod patterns;
mod report;
mod score;


pub use metrics::PerformanceMetrics;
pub use patterns::{
    is_affiliate, is_tracking, shortener_service, suspicious_domains, uses_shortener,
    SHORTENER_DOMAINS,
};
pub use report::{AnalysisReport, SecurityAnalysis};
pub use score::{safety_score, threat_level, ThreatLevel};
