use rmcp::ErrorData as McpError;
use rmcp::serde_json::json;

use crate::core::utils::AVAILABLE_RESOURCES;

// Error codes
const ERROR_UNKNOWN_TIMEZONE: &str = "unknown_timezone";
const ERROR_INVALID_TIME_FORMAT: &str = "invalid_time_format";
const ERROR_MISSING_FIELD: &str = "missing_field";
const ERROR_INVALID_ACTION: &str = "invalid_action";
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";

/// Errors produced while answering a time tool request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeToolError {
    #[error("Unknown timezone: {timezone}")]
    UnknownTimezone { timezone: String },
    #[error("Invalid time format: {time}. Expected HH:MM")]
    InvalidTimeFormat { time: String },
    #[error("Missing required field: {field}")]
    MissingField { field: String },
    #[error("Invalid action: {action}")]
    InvalidAction { action: String },
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },
}

impl TimeToolError {
    pub(crate) fn unknown_timezone(timezone: &str) -> Self {
        Self::UnknownTimezone {
            timezone: timezone.to_string(),
        }
    }

    pub(crate) fn missing_field(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }
}

impl From<TimeToolError> for McpError {
    fn from(err: TimeToolError) -> Self {
        match err {
            TimeToolError::UnknownTimezone { timezone } => McpError::invalid_params(
                ERROR_UNKNOWN_TIMEZONE,
                Some(json!({"timezone": timezone})),
            ),
            TimeToolError::InvalidTimeFormat { time } => McpError::invalid_params(
                ERROR_INVALID_TIME_FORMAT,
                Some(json!({"time": time, "expected": "HH:MM"})),
            ),
            TimeToolError::MissingField { field } => {
                McpError::invalid_params(ERROR_MISSING_FIELD, Some(json!({"field": field})))
            }
            TimeToolError::InvalidAction { action } => McpError::invalid_params(
                ERROR_INVALID_ACTION,
                Some(json!({
                    "action": action,
                    "valid_actions": ["get_current_time", "convert_time"]
                })),
            ),
            TimeToolError::ResourceNotFound { uri } => McpError::resource_not_found(
                ERROR_RESOURCE_NOT_FOUND,
                Some(json!({
                    "uri": uri,
                    "available_resources": AVAILABLE_RESOURCES
                })),
            ),
        }
    }
}

/// Errors raised while turning CLI and environment input into a [`Config`](crate::config::Config)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid logging level '{level}'. Expected one of TRACE, DEBUG, INFO, WARN, WARNING, ERROR, CRITICAL")]
    InvalidLoggingLevel { level: String },
    #[error("Invalid default timezone: {timezone}")]
    InvalidDefaultTimezone { timezone: String },
    /// Logging initialization failed
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
}

pub type TimeToolResult<T> = Result<T, TimeToolError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::TimeToolError;
    use crate::core::error::McpError;

    #[test]
    fn test_error_conversion() {
        let error = TimeToolError::UnknownTimezone {
            timezone: "Mars/Phobos".to_string(),
        };
        let mcp_error: McpError = error.into();

        assert!(mcp_error.to_string().contains("unknown_timezone"));
        let data = mcp_error.data.expect("error data");
        assert_eq!(data["timezone"], "Mars/Phobos");
    }

    #[test]
    fn test_invalid_action_lists_valid_actions() {
        let mcp_error: McpError = TimeToolError::InvalidAction {
            action: "delete_time".to_string(),
        }
        .into();

        assert!(mcp_error.to_string().contains("invalid_action"));
        let data = mcp_error.data.expect("error data");
        assert_eq!(data["action"], "delete_time");
        assert_eq!(data["valid_actions"][1], "convert_time");
    }

    #[test]
    fn test_messages_name_offending_value() {
        let error = TimeToolError::InvalidTimeFormat {
            time: "9:30".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid time format: 9:30. Expected HH:MM");

        let error = TimeToolError::missing_field("time");
        assert_eq!(error.to_string(), "Missing required field: time");
    }
}
