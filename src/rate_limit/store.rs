//! Counter backends.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error_handling::RateLimitStoreError;

/// Key-value counter backend with per-key expiry.
pub trait CounterStore: Send + Sync {
    /// Current count for `key`, or `None` when the key is absent or expired.
    fn get_count(&self, key: &str) -> Result<Option<i64>, RateLimitStoreError>;

    /// Adds one to `key` and (re)sets its expiry to `ttl` from now.
    fn increment(&self, key: &str, ttl: Duration) -> Result<(), RateLimitStoreError>;
}

/// Map size at which `increment` first sweeps expired entries.
pub const DEFAULT_SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug)]
struct Entries {
    counters: HashMap<String, (i64, Instant)>,
    /// Size that triggers the next sweep
    next_sweep: usize,
}

impl Entries {
    fn sweep(&mut self, now: Instant, threshold: usize) {
        self.counters.retain(|_, (_, expires_at)| *expires_at > now);
        // Next sweep waits until the live set doubles
        self.next_sweep = threshold.max(self.counters.len().saturating_mul(2));
    }
}

/// In-process store; entries vanish once their TTL elapses.
///
/// Expired entries are swept on insert whenever the map reaches its sweep size,
/// so keys that are never read again do not accumulate.
#[derive(Debug)]
pub struct MemoryCounterStore {
    entries: Mutex<Entries>,
    sweep_threshold: usize,
}

impl Default for MemoryCounterStore {
    fn default() -> Self {
        Self::with_sweep_threshold(DEFAULT_SWEEP_THRESHOLD)
    }
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sweep_threshold(sweep_threshold: usize) -> Self {
        let sweep_threshold = sweep_threshold.max(1);
        Self {
            entries: Mutex::new(Entries {
                counters: HashMap::new(),
                next_sweep: sweep_threshold,
            }),
            sweep_threshold,
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> Result<usize, RateLimitStoreError> {
        Ok(self.lock()?.counters.len())
    }

    pub fn is_empty(&self) -> Result<bool, RateLimitStoreError> {
        Ok(self.lock()?.counters.is_empty())
    }

    /// Drops expired entries and returns how many remain.
    pub fn purge_expired(&self) -> Result<usize, RateLimitStoreError> {
        let mut entries = self.lock()?;
        entries.sweep(Instant::now(), self.sweep_threshold);
        Ok(entries.counters.len())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Entries>, RateLimitStoreError> {
        self.entries
            .lock()
            .map_err(|e| RateLimitStoreError::Unavailable(format!("counter lock poisoned: {e}")))
    }
}

impl CounterStore for MemoryCounterStore {
    fn get_count(&self, key: &str) -> Result<Option<i64>, RateLimitStoreError> {
        let entries = self.lock()?;
        Ok(entries
            .counters
            .get(key)
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(count, _)| *count))
    }

    fn increment(&self, key: &str, ttl: Duration) -> Result<(), RateLimitStoreError> {
        let mut entries = self.lock()?;
        let now = Instant::now();
        if entries.counters.len() >= entries.next_sweep && !entries.counters.contains_key(key) {
            entries.sweep(now, self.sweep_threshold);
        }
        let entry = entries.counters.entry(key.to_string()).or_insert((0, now));
        if entry.1 <= now {
            entry.0 = 0;
        }
        entry.0 += 1;
        entry.1 = now + ttl;
        Ok(())
    }
}
