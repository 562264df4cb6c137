//! Fan-out over the walker: validated single walks, multi-identity comparison
//! and bulk walks. Walks inside one call share nothing but the HTTP client.

mod analyze;
mod bulk;
mod compare;

#[cfg(test)]
mod tests;

pub use analyze::analyze_url;
pub use bulk::{walk_many, BulkOutcome};
pub use compare::{compare, compare_desktop_mobile, ComparisonResult, VariantResult};
