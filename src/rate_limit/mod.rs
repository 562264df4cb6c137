//! Per-client daily request quotas.
//!
//! Counters live behind the [`CounterStore`] trait so the server can plug in an
//! external key-value backend; [`MemoryCounterStore`] is the in-process one.
//!
//! Counting is read-then-write with no transaction. Concurrent requests from the
//! same client can both read the same count and undercount by one each; that
//! approximation is accepted.

mod limiter;
mod store;

pub use limiter::{bucket_key, check_rate_limit, EndpointClass, RateLimitDecision};
pub use store::{CounterStore, MemoryCounterStore};
