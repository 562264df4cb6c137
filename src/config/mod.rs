//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, etc.)
//! - Library configuration types
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command, GlobalArgs};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
