//! Input helpers shared by the CLI and the HTTP surface.

pub mod url;

// Re-export public API
pub use url::normalize_url;
