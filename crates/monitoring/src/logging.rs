//! Logging configuration and initialization
//!
//! This module provides centralized logging functionality with:
//! - Console logging (default) or daily rotating file logging
//! - Configurable log directories and file prefixes
//! - `RUST_LOG` filter directives

use anyhow::Result;
use std::env;
use tracing::{info, warn};
use tracing_appender::rolling;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_LOG_FILE_PREFIX: &str = "api";

/// Where log output is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    Console,
    File,
}

impl LogDestination {
    /// Parse the `LOG_DESTINATION` value. Anything other than "file" logs to the console.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "file" => LogDestination::File,
            _ => LogDestination::Console,
        }
    }

    /// Read the destination from the `LOG_DESTINATION` environment variable
    pub fn from_env() -> Self {
        env::var("LOG_DESTINATION")
            .map(|value| Self::parse(&value))
            .unwrap_or(LogDestination::Console)
    }
}

/// Initialize tracing with configurable output destination
///
/// ## Environment Variables
///
/// - `RUST_LOG`: filter directives (default: "info")
/// - `LOG_DESTINATION`: "console" or "file" (default: "console")
/// - `LOG_DIR`: Directory for log files (default: "./logs") - only used when LOG_DESTINATION=file
/// - `LOG_FILE_PREFIX`: Prefix for log file names (default: "api") - only used when LOG_DESTINATION=file
pub fn init_logging() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());

    match LogDestination::from_env() {
        LogDestination::Console => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stdout)
                        .with_ansi(true)
                        .with_target(true),
                )
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize console tracing subscriber: {}", e))?;

            info!("Logging to console (stdout)");
        }
        LogDestination::File => {
            let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
            let log_file_prefix = env::var("LOG_FILE_PREFIX")
                .unwrap_or_else(|_| DEFAULT_LOG_FILE_PREFIX.to_string());

            std::fs::create_dir_all(&log_dir).map_err(|e| {
                anyhow::anyhow!("Failed to create log directory '{}': {}", log_dir, e)
            })?;

            let file_appender = rolling::daily(&log_dir, &log_file_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_target(false),
                )
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize file tracing subscriber: {}", e))?;

            info!("Logging to daily rotating files in: {}/", log_dir);
            info!("Log file pattern: {}/{}.<YYYY-MM-DD>", log_dir, log_file_prefix);

            // The guard flushes the background writer; it must live as long as the process.
            std::mem::forget(guard);
        }
    }

    if env::var("RUST_LOG").is_err() {
        warn!("RUST_LOG not set, defaulting to 'info' level");
    }

    Ok(())
}
