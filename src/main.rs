//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `redirect_analyzer` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Printing results as JSON
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use redirect_analyzer::server::{start_server, AppState};
use redirect_analyzer::{
    analyze_url, available_bots, bot_identities, compare, compare_desktop_mobile, detect_loop,
    init_logger_with, init_redirect_client, walk_many, AnalysisReport, Cli, Command,
    RequestIdentity,
};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists), e.g. RUST_LOG
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.config();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let client = init_redirect_client(&config).context("Failed to initialize HTTP client")?;
    let options = config.walk_options();

    match cli.command {
        Command::Analyze {
            url,
            user_agent,
            username,
            password,
        } => {
            let mut identity = RequestIdentity::new("cli", user_agent);
            if let (Some(username), Some(password)) = (username, password) {
                identity = identity.with_basic_auth(username, password);
            }
            match analyze_url(&client, &url, &identity, &options).await {
                Ok(chain) => print_json(&AnalysisReport::build(&url, &chain))?,
                Err(e) => {
                    eprintln!("redirect_analyzer: {}: {}", url, e);
                    process::exit(2);
                }
            }
        }
        Command::DetectLoop { url } => {
            match analyze_url(&client, &url, &RequestIdentity::default(), &options).await {
                Ok(chain) => print_json(&detect_loop(&chain))?,
                Err(e) => {
                    eprintln!("redirect_analyzer: {}: {}", url, e);
                    process::exit(2);
                }
            }
        }
        Command::Compare { url } => {
            reject_unsafe(&url);
            print_json(&compare_desktop_mobile(&client, &url, &options).await)?;
        }
        Command::Bots { url, bots } => {
            reject_unsafe(&url);
            let (identities, unknown) = bot_identities(&bots);
            if !unknown.is_empty() {
                log::warn!(
                    "Ignoring unknown bots {}. Available: {}",
                    unknown.join(", "),
                    available_bots().join(", ")
                );
            }
            print_json(&compare(&client, &url, &identities, &options).await)?;
        }
        Command::Bulk { urls } => {
            let identity = RequestIdentity::new("bulk", config.user_agent.as_str());
            print_json(&walk_many(&client, &urls, &identity, &options).await)?;
        }
        Command::Serve { port, bind } => {
            let state = AppState::new(client, &config);
            if let Err(e) = start_server(&bind, port, state).await {
                eprintln!("redirect_analyzer error: {:#}", e);
                process::exit(1);
            }
        }
    }

    Ok(())
}

/// Exits with status 2 when `url` fails validation.
fn reject_unsafe(url: &str) {
    let verdict = redirect_analyzer::validate_url(url);
    if !verdict.valid {
        eprintln!(
            "redirect_analyzer: {}: {}",
            url,
            verdict.reason.unwrap_or_default()
        );
        process::exit(2);
    }
}
