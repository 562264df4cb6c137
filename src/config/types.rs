//! Configuration types.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and library configuration.

use clap::ValueEnum;

use crate::config::constants::{DEFAULT_MAX_HOPS, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use redirect_analyzer::Config;
///
/// let config = Config {
///     max_hops: 5,
///     timeout_seconds: 3,
///     ..Default::default()
/// };
/// assert_eq!(config.walk_options().max_hops, 5);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-hop request timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum requests issued while walking one chain
    pub max_hops: usize,

    /// User-Agent used when the caller does not pick an identity
    pub user_agent: String,

    /// Re-run URL validation on every redirect target before following it
    pub revalidate_hops: bool,
}

impl Config {
    /// Walker options derived from this configuration.
    pub fn walk_options(&self) -> crate::WalkOptions {
        crate::WalkOptions {
            max_hops: self.max_hops,
            revalidate_hops: self.revalidate_hops,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_hops: DEFAULT_MAX_HOPS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            revalidate_hops: false,
        }
    }
}
