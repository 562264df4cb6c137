//! Composite safety score.

use serde::Serialize;

use super::patterns::{suspicious_domains, uses_shortener};
use crate::models::Chain;

/// Coarse risk bucket derived from a safety score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

/// Scores a finished chain from 0 (worst) to 100.
///
/// Starting at 100:
/// - 20 off if any hop uses plain http
/// - 15 off per distinct suspicious domain
/// - 10 off for more than 3 redirects, a further 15 for more than 5
/// - 10 off if any hop is on a known shortener
///
/// Only counts feed the score, so hop order never changes it.
pub fn safety_score(_original_url: &str, chain: &Chain) -> u8 {
    let mut score: i64 = 100;

    if chain.hops.iter().any(|h| h.is_plain_http()) {
        score -= 20;
    }

    let suspicious = i64::try_from(suspicious_domains(chain).len()).unwrap_or(i64::MAX / 16);
    score -= 15 * suspicious;

    let redirects = chain.total_redirects();
    if redirects > 3 {
        score -= 10;
    }
    if redirects > 5 {
        score -= 15;
    }

    if uses_shortener(chain) {
        score -= 10;
    }

    score.clamp(0, 100) as u8
}

/// Maps a score to its threat level: above 80 is low, above 50 medium, else high.
pub fn threat_level(score: u8) -> ThreatLevel {
    if score > 80 {
        ThreatLevel::Low
    } else if score > 50 {
        ThreatLevel::Medium
    } else {
        ThreatLevel::High
    }
}
