//! Quota decisions per endpoint class.

use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::config::RATE_LIMIT_TTL_SECS;
use crate::rate_limit::CounterStore;

/// Endpoint groups sharing one daily quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EndpointClass {
    /// Single-URL analysis, 100 per day
    Basic,
    /// Bulk analysis, 10 per day
    Bulk,
    /// Security scans, 50 per day
    Security,
    /// No quota
    Enterprise,
}

impl EndpointClass {
    /// Daily cap, or `None` when unlimited.
    pub fn daily_limit(&self) -> Option<i64> {
        match self {
            EndpointClass::Basic => Some(100),
            EndpointClass::Bulk => Some(10),
            EndpointClass::Security => Some(50),
            EndpointClass::Enterprise => None,
        }
    }
}

/// Outcome of one quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Requests counted today including this one when allowed
    pub count: i64,
    /// Daily cap; `-1` means unlimited
    pub limit: i64,
}

impl RateLimitDecision {
    /// Requests left today, `None` when unlimited.
    pub fn remaining(&self) -> Option<i64> {
        (self.limit >= 0).then(|| (self.limit - self.count).max(0))
    }
}

/// Counter key: `{class}:{client_ip}:{YYYY-MM-DD}`.
pub fn bucket_key(class: EndpointClass, client_ip: &str, day: NaiveDate) -> String {
    format!("{}:{}:{}", class, client_ip, day.format("%Y-%m-%d"))
}

/// Reads the client's count for `day`, denies at the cap, otherwise increments.
///
/// Enterprise returns `limit = -1` without touching the store. A failing store
/// lets the request through.
pub fn check_rate_limit(
    store: &dyn CounterStore,
    class: EndpointClass,
    client_ip: &str,
    day: NaiveDate,
) -> RateLimitDecision {
    let Some(limit) = class.daily_limit() else {
        return RateLimitDecision {
            allowed: true,
            count: 0,
            limit: -1,
        };
    };

    let key = bucket_key(class, client_ip, day);
    let count = match store.get_count(&key) {
        Ok(count) => count.unwrap_or(0),
        Err(e) => {
            warn!("Rate limit lookup failed for {}, allowing: {}", key, e);
            return RateLimitDecision {
                allowed: true,
                count: 0,
                limit,
            };
        }
    };

    if count >= limit {
        debug!("Rate limit hit for {} ({}/{})", key, count, limit);
        return RateLimitDecision {
            allowed: false,
            count,
            limit,
        };
    }

    if let Err(e) = store.increment(&key, Duration::from_secs(RATE_LIMIT_TTL_SECS)) {
        warn!("Rate limit increment failed for {}: {}", key, e);
    }

    RateLimitDecision {
        allowed: true,
        count: count + 1,
        limit,
    }
}
