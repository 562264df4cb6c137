//! Logger initialization.

use std::io::Write;

use colored::*;
use log::LevelFilter;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Initializes `env_logger` with the given level and output format.
///
/// `RUST_LOG` is read first so per-module directives still work; `level` then
/// overrides the global and crate-level filter. HTTP stack crates are capped at
/// `info` so per-hop traces stay readable at `debug`.
///
/// ```bash
/// RUST_LOG=redirect_analyzer=debug redirect_analyzer analyze https://bit.ly/x
/// redirect_analyzer --log-format json --log-level warn bulk https://a.example https://b.example
/// ```
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);
    builder.filter_module("redirect_analyzer", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                let level = record.level().to_string();
                let level = match record.level() {
                    log::Level::Error => level.red(),
                    log::Level::Warn => level.yellow(),
                    log::Level::Info => level.green(),
                    log::Level::Debug => level.blue(),
                    log::Level::Trace => level.purple(),
                };
                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    level,
                    record.args()
                )
            });
        }
    }

    // try_init so a second call (tests, embedding) is an error rather than a panic
    builder.try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_logger_init_is_an_error_not_a_panic() {
        // Whichever call wins the global logger, the other must fail cleanly
        let first = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(first.is_err() || second.is_err());
        if let Err(e) = second {
            assert!(e.to_string().starts_with("Logger initialization error"));
        }
    }
}
