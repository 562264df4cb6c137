//! Application initialization and resource setup.
//!
//! - HTTP client with redirects disabled
//! - Logger

mod client;
mod logger;

// Re-export public API
pub use client::init_redirect_client;
pub use logger::init_logger_with;
