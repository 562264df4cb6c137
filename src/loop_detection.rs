//! Redirect loop detection over a finished chain.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::Chain;

/// Result of scanning a chain for a repeated URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoopReport {
    /// A requested URL appeared twice
    pub detected: bool,
    /// Hops from the first occurrence of the repeated URL up to and including the repeat
    pub cycle_urls: Vec<String>,
    /// 0-based index of the first occurrence, when a loop was detected
    pub start_index: Option<usize>,
    /// Traversal was cut by the hop limit. Supporting evidence only; never sets `detected`.
    pub hop_limit_reached: bool,
}

impl LoopReport {
    pub fn loop_length(&self) -> usize {
        self.cycle_urls.len()
    }
}

/// Scans hops in order and reports the first repeated requested URL.
///
/// Runs in O(n) over the hops.
pub fn detect_loop(chain: &Chain) -> LoopReport {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (index, hop) in chain.hops.iter().enumerate() {
        let url = hop.requested_url.as_str();
        if let Some(&start) = first_seen.get(url) {
            return LoopReport {
                detected: true,
                cycle_urls: chain.hops[start..=index]
                    .iter()
                    .map(|h| h.requested_url.clone())
                    .collect(),
                start_index: Some(start),
                hop_limit_reached: chain.hit_redirect_limit(),
            };
        }
        first_seen.insert(url, index);
    }

    LoopReport {
        detected: false,
        cycle_urls: Vec::new(),
        start_index: None,
        hop_limit_reached: chain.hit_redirect_limit(),
    }
}
