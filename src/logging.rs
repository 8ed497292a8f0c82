//! Logging configuration for chatlens

use std::path::Path;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

use crate::config::AppConfig;
use crate::Result;

const LOGS_DIR: &str = "logs";
const LOG_FILE: &str = "chatlens.log";

/// Initialize logging from `RUST_LOG`, defaulting to info
pub fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,chatlens=info"));
    init_with_filter(env_filter, true)
}

/// Initialize logging with configuration
pub fn init_logging_with_config(config: &AppConfig) -> Result<()> {
    let level = config.log_level();
    init_with_filter(
        EnvFilter::new(format!("warn,chatlens={level}")),
        config.logging.log_to_file,
    )?;
    tracing::debug!("Logging initialized with level: {}", level);
    Ok(())
}

/// Initialize logging with custom log level
pub fn init_logging_with_level(level: &str) -> Result<()> {
    init_with_filter(EnvFilter::new(format!("warn,chatlens={level}")), true)?;
    tracing::debug!("Logging initialized with level: {}", level);
    Ok(())
}

fn init_with_filter(env_filter: EnvFilter, log_to_file: bool) -> Result<()> {
    // Console output goes to stderr so stdout stays clean for reports
    let console_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = if log_to_file {
        let logs_dir = Path::new(LOGS_DIR);
        if !logs_dir.exists() {
            std::fs::create_dir_all(logs_dir)?;
        }

        let file_appender = tracing_appender::rolling::daily(LOGS_DIR, LOG_FILE);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // The guard flushes on drop; logging lives for the whole process.
        std::mem::forget(guard);

        Some(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_writer(non_blocking)
                .with_ansi(false)
                .boxed(),
        )
    } else {
        None
    };

    Registry::default()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| crate::ChatLensError::Custom(format!("Failed to initialize logging: {e}")))?;

    Ok(())
}

/// Initialize simple logging for testing
pub fn init_simple_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_max_level(tracing::Level::INFO)
        .with_test_writer()
        .try_init()
        .map_err(|e| crate::ChatLensError::Custom(format!("Failed to initialize logging: {e}")))?;

    tracing::info!("Simple logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_initialization() {
        // A second initialization in the same process reports an error
        // instead of panicking.
        let _ = init_simple_logging();
        assert!(init_simple_logging().is_err());
    }
}
