//! Latency summary over a chain.

use serde::Serialize;

use crate::models::Chain;

/// Per-chain latency summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    pub total_response_time_ms: u64,
    /// Mean hop latency rounded to one decimal
    pub average_response_time_ms: f64,
    pub fastest_step_ms: u64,
    pub slowest_step_ms: u64,
    /// `A` under 500ms average, `B` under 1000ms, else `C`
    pub performance_grade: char,
}

impl PerformanceMetrics {
    pub fn from_chain(chain: &Chain) -> Self {
        let times: Vec<u64> = chain.hops.iter().map(|h| h.response_time_ms).collect();
        let total: u64 = times.iter().sum();
        let average = if times.is_empty() {
            0.0
        } else {
            total as f64 / times.len() as f64
        };

        let grade = if average < 500.0 {
            'A'
        } else if average < 1000.0 {
            'B'
        } else {
            'C'
        };

        Self {
            total_response_time_ms: total,
            average_response_time_ms: (average * 10.0).round() / 10.0,
            fastest_step_ms: times.iter().copied().min().unwrap_or(0),
            slowest_step_ms: times.iter().copied().max().unwrap_or(0),
            performance_grade: grade,
        }
    }
}
