//! Full analysis report for one walked URL.

use serde::Serialize;

use super::metrics::PerformanceMetrics;
use super::patterns::{is_affiliate, is_tracking, suspicious_domains};
use super::score::{safety_score, threat_level, ThreatLevel};
use crate::models::{Chain, Hop};

/// Security block of an [`AnalysisReport`].
#[derive(Debug, Clone, Serialize)]
pub struct SecurityAnalysis {
    pub https_only: bool,
    pub suspicious_domains: Vec<String>,
    pub threat_level: ThreatLevel,
}

/// Everything derived from one chain, in the shape returned by `/api/analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub input_url: String,
    pub final_url: String,
    pub redirect_chain: Vec<Hop>,
    pub total_redirects: usize,
    pub chain_length: usize,
    pub is_affiliate_link: bool,
    pub is_tracking_url: bool,
    pub safety_score: u8,
    pub security_analysis: SecurityAnalysis,
    pub performance_metrics: PerformanceMetrics,
    /// Chain-level error (hop limit, transport failure), if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Builds the report. Pure: no network access.
    pub fn build(input_url: &str, chain: &Chain) -> Self {
        let score = safety_score(input_url, chain);
        Self {
            input_url: input_url.to_string(),
            final_url: chain.final_url_or(input_url).to_string(),
            redirect_chain: chain.hops.clone(),
            total_redirects: chain.total_redirects(),
            chain_length: chain.len(),
            is_affiliate_link: is_affiliate(input_url, chain),
            is_tracking_url: is_tracking(input_url, chain),
            safety_score: score,
            security_analysis: SecurityAnalysis {
                https_only: chain.https_only(),
                suspicious_domains: suspicious_domains(chain),
                threat_level: threat_level(score),
            },
            performance_metrics: PerformanceMetrics::from_chain(chain),
            error: chain.terminal_error.clone(),
        }
    }
}
