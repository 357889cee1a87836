use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::core::error::{ConfigError, ConfigResult};

/// Initialize logging from the configured level
///
/// `RUST_LOG`, when set, takes precedence over the configured level. Output
/// goes to stderr without ANSI colors since stdout carries the MCP transport.
///
/// # Returns
/// - `Ok(())` if the global subscriber was installed
/// - `Err(ConfigError::LoggingInitialization)` if one is already installed
pub fn init_logging(config: &Config) -> ConfigResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(config.logging_level.as_filter().into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| ConfigError::LoggingInitialization(e.to_string()))?;

    tracing::info!("Logging initialized with level: {}", config.logging_level);
    Ok(())
}
