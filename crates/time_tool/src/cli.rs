use clap::Parser;

use crate::config::{Config, SchemaPolicy};
use crate::core::error::ConfigResult;
use crate::core::utils::DEFAULT_TIMEZONE;

/// Time Tool Server
///
/// Serves a single `time` tool over the Model Context Protocol on stdio.
/// The tool answers `get_current_time` and `convert_time` actions for any
/// IANA timezone.
///
/// ## Development
/// ```bash
/// npx @modelcontextprotocol/inspector cargo run --bin agent-time-tool
/// ```
///
/// ## Configuration
/// Add to your MCP client configuration:
/// ```json
/// {
///   "mcpServers": {
///     "time": {
///       "command": "agent-time-tool",
///       "args": ["--default-timezone", "Europe/London"],
///       "env": {
///         "LOGGING_LEVEL": "DEBUG"
///       }
///     }
///   }
/// }
/// ```
///
/// ## Environment Variables
/// - `LOGGING_LEVEL`: Logging verbosity (TRACE, DEBUG, INFO, WARNING, ERROR, CRITICAL)
/// - `DEFAULT_TIMEZONE`: Zone used for omitted timezone fields
/// - `STRICT_SCHEMA`: Require every timezone field instead of defaulting
/// - `RUST_LOG`: Overrides `LOGGING_LEVEL` with a full filter directive
#[derive(Parser, Debug, Clone)]
#[command(name = "agent-time-tool")]
#[command(about = "An MCP time tool for current time queries and timezone conversion")]
#[command(version)]
pub struct Cli {
    /// Logging level (TRACE, DEBUG, INFO, WARN/WARNING, ERROR/CRITICAL)
    #[arg(long, env = "LOGGING_LEVEL", default_value = "INFO", value_name = "LEVEL")]
    pub logging_level: String,

    /// IANA timezone used when a request omits one; `local` uses the system zone
    #[arg(
        long,
        env = "DEFAULT_TIMEZONE",
        default_value = DEFAULT_TIMEZONE,
        value_name = "TIMEZONE"
    )]
    pub default_timezone: String,

    /// Require timezone fields instead of falling back to the default
    #[arg(long, env = "STRICT_SCHEMA")]
    pub strict_schema: bool,
}

impl Cli {
    /// Parse process arguments into a validated configuration
    pub fn parse_config() -> ConfigResult<Config> {
        Self::parse().into_config()
    }

    pub fn into_config(self) -> ConfigResult<Config> {
        let schema_policy = if self.strict_schema {
            SchemaPolicy::Strict
        } else {
            SchemaPolicy::Defaulted
        };

        Config::new(
            self.logging_level.parse()?,
            &self.default_timezone,
            schema_policy,
        )
    }
}
