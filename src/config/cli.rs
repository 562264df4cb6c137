//! Command-line interface definition.

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_MAX_HOPS, DEFAULT_SERVER_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::config::types::{Config, LogFormat, LogLevel};

/// Walk HTTP redirect chains and score them.
#[derive(Debug, Parser)]
#[command(name = "redirect_analyzer", version, about)]
pub struct Cli {
    /// Options shared by every subcommand
    #[command(flatten)]
    pub global: GlobalArgs,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    pub log_format: LogFormat,

    /// Per-hop request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_seconds: u64,

    /// Maximum requests issued for one chain
    #[arg(long, default_value_t = DEFAULT_MAX_HOPS, global = true)]
    pub max_hops: usize,

    /// Validate every redirect target before following it
    #[arg(long, global = true)]
    pub revalidate_hops: bool,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk one URL and print the full analysis report
    Analyze {
        /// URL to analyze
        url: String,
        /// User-Agent to send on every hop
        #[arg(long, default_value = DEFAULT_USER_AGENT)]
        user_agent: String,
        /// Basic auth username
        #[arg(long, requires = "password")]
        username: Option<String>,
        /// Basic auth password
        #[arg(long, requires = "username")]
        password: Option<String>,
    },
    /// Walk one URL and report any redirect loop
    #[command(name = "loop", alias = "detect-loop")]
    DetectLoop {
        /// URL to check
        url: String,
    },
    /// Compare desktop and mobile redirect behaviour
    Compare {
        /// URL to compare
        url: String,
    },
    /// Compare redirect behaviour across crawler user agents
    Bots {
        /// URL to test
        url: String,
        /// Bot names (googlebot, bingbot, ...); repeat the flag for several
        #[arg(long = "bot", default_values_t = vec!["googlebot".to_string(), "bingbot".to_string()])]
        bots: Vec<String>,
    },
    /// Walk several URLs concurrently
    Bulk {
        /// URLs to walk
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Serve the HTTP API
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = DEFAULT_SERVER_PORT)]
        port: u16,
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

impl Cli {
    /// Library configuration built from the global flags.
    pub fn config(&self) -> Config {
        Config {
            log_level: self.global.log_level.clone(),
            log_format: self.global.log_format.clone(),
            timeout_seconds: self.global.timeout_seconds,
            max_hops: self.global.max_hops,
            revalidate_hops: self.global.revalidate_hops,
            ..Default::default()
        }
    }
}
