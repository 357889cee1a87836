use std::fmt;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use crate::core::error::{ConfigError, ConfigResult};
use crate::core::timezone::{local_timezone, resolve_timezone};
use crate::core::utils::DEFAULT_TIMEZONE;

/// Alias accepted for the default timezone that resolves to the system zone
pub const LOCAL_TIMEZONE_ALIAS: &str = "local";

/// Whether omitted timezone fields fall back to the default zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaPolicy {
    /// Omitted timezone fields use the configured default
    #[default]
    Defaulted,
    /// Every timezone field the action reads must be supplied
    Strict,
}

/// Logging verbosity, accepting Python-style level names as well
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.write_str(name)
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" | "CRITICAL" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLoggingLevel {
                level: s.to_string(),
            }),
        }
    }
}

/// Configuration injected into the converter and the MCP service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub logging_level: LogLevel,
    /// Resolved IANA name used for omitted timezone fields
    pub default_timezone: String,
    pub schema_policy: SchemaPolicy,
}

impl Config {
    /// Build a configuration, resolving the `local` alias and validating the
    /// default timezone
    pub fn new(
        logging_level: LogLevel,
        default_timezone: &str,
        schema_policy: SchemaPolicy,
    ) -> ConfigResult<Self> {
        let default_timezone = if default_timezone.eq_ignore_ascii_case(LOCAL_TIMEZONE_ALIAS) {
            local_timezone().name().to_string()
        } else {
            resolve_timezone(default_timezone)
                .map_err(|_| ConfigError::InvalidDefaultTimezone {
                    timezone: default_timezone.to_string(),
                })?
                .name()
                .to_string()
        };

        Ok(Self {
            logging_level,
            default_timezone,
            schema_policy,
        })
    }

    pub fn strict(&self) -> bool {
        self.schema_policy == SchemaPolicy::Strict
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging_level: LogLevel::default(),
            default_timezone: DEFAULT_TIMEZONE.to_string(),
            schema_policy: SchemaPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("CRITICAL".parse::<LogLevel>().unwrap(), LogLevel::Error);

        let err = "LOUD".parse::<LogLevel>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLoggingLevel { ref level } if level == "LOUD"));
        assert!(err.to_string().contains("LOUD"));
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Debug.as_filter(), LevelFilter::DEBUG);
        assert_eq!(LogLevel::Error.as_filter(), LevelFilter::ERROR);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging_level, LogLevel::Info);
        assert_eq!(config.default_timezone, "UTC");
        assert!(!config.strict());
    }

    #[test]
    fn test_config_validates_default_timezone() {
        let config = Config::new(LogLevel::Info, "Asia/Tokyo", SchemaPolicy::Strict).unwrap();
        assert_eq!(config.default_timezone, "Asia/Tokyo");
        assert!(config.strict());

        let err = Config::new(LogLevel::Info, "Mars/Phobos", SchemaPolicy::Defaulted).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidDefaultTimezone { ref timezone } if timezone == "Mars/Phobos")
        );
    }

    #[test]
    fn test_config_resolves_local_alias() {
        let config = Config::new(LogLevel::Info, "local", SchemaPolicy::Defaulted).unwrap();
        assert!(resolve_timezone(&config.default_timezone).is_ok());
    }
}
