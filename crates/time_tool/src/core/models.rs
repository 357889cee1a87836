use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use chrono_tz::OffsetComponents;
use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::error::TimeToolError;
use crate::core::utils::format_iso8601;

/// Helper function to deserialize and trim optional strings
fn deserialize_trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()))
}

/// Helper function to deserialize and trim strings
fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Operations the time tool can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetCurrentTime,
    ConvertTime,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::GetCurrentTime, Action::ConvertTime];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetCurrentTime => "get_current_time",
            Action::ConvertTime => "convert_time",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = TimeToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| TimeToolError::InvalidAction {
                action: s.to_string(),
            })
    }
}

/// Zoned instant as reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeResult {
    /// IANA timezone name
    pub timezone: String,
    /// ISO 8601 datetime string with UTC offset
    pub datetime: String,
    /// Whether daylight saving time is active
    pub is_dst: bool,
}

impl TimeResult {
    /// Create a TimeResult from a timezone-aware datetime
    pub fn from_datetime<Z>(dt: &DateTime<Z>, timezone_name: &str) -> TimeResult
    where
        Z: TimeZone,
        Z::Offset: OffsetComponents + fmt::Display,
    {
        let is_dst = dt.offset().dst_offset().num_seconds() != 0;

        TimeResult {
            timezone: timezone_name.to_string(),
            datetime: format_iso8601(dt),
            is_dst,
        }
    }
}

/// Time conversion result with source and target information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeConversionResult {
    /// Source time information
    pub source: TimeResult,
    /// Target time information
    pub target: TimeResult,
    /// Signed UTC offset difference, target minus source (e.g. "+5.5h")
    pub time_difference: String,
}

/// Output of a dispatched tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    CurrentTime(TimeResult),
    Conversion(TimeConversionResult),
}

/// Request accepted by the time tool
#[derive(Debug, Clone, Default, Deserialize, schemars::JsonSchema)]
pub struct ToolRequest {
    /// The action to perform (get_current_time or convert_time)
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub action: String,
    /// IANA timezone name (e.g., 'America/New_York', 'Europe/London'), used by get_current_time
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    pub timezone: Option<String>,
    /// Source IANA timezone name, used by convert_time
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    pub source_timezone: Option<String>,
    /// Time in 24-hour format (HH:MM), required for convert_time
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    pub time: Option<String>,
    /// Target IANA timezone name, used by convert_time
    #[serde(default, deserialize_with = "deserialize_trimmed_option")]
    pub target_timezone: Option<String>,
}

impl ToolRequest {
    pub fn get_current_time(timezone: Option<&str>) -> Self {
        Self {
            action: Action::GetCurrentTime.to_string(),
            timezone: timezone.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn convert_time(
        source_timezone: Option<&str>,
        time: Option<&str>,
        target_timezone: Option<&str>,
    ) -> Self {
        Self {
            action: Action::ConvertTime.to_string(),
            source_timezone: source_timezone.map(str::to_string),
            time: time.map(str::to_string),
            target_timezone: target_timezone.map(str::to_string),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_result_serialization() {
        let time_result = TimeResult {
            timezone: "UTC".to_string(),
            datetime: "2024-01-01T12:00:00+00:00".to_string(),
            is_dst: false,
        };

        let json = serde_json::to_value(&time_result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "timezone": "UTC",
                "datetime": "2024-01-01T12:00:00+00:00",
                "is_dst": false
            })
        );
    }

    #[test]
    fn test_tool_output_is_untagged() {
        let source = TimeResult {
            timezone: "UTC".to_string(),
            datetime: "2024-01-01T12:00:00+00:00".to_string(),
            is_dst: false,
        };
        let output = ToolOutput::Conversion(TimeConversionResult {
            source: source.clone(),
            target: source,
            time_difference: "+0.0h".to_string(),
        });

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["time_difference"], "+0.0h");
        assert_eq!(json["source"]["timezone"], "UTC");
    }

    #[test]
    fn test_request_trimming() {
        let json = r#"{"action": " get_current_time ", "timezone": "   Africa/Cairo   "}"#;
        let request: ToolRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.action, "get_current_time");
        assert_eq!(request.timezone.as_deref(), Some("Africa/Cairo"));
        assert_eq!(request.time, None);

        let json = r#"{
            "action": "convert_time",
            "source_timezone": "  America/New_York  ",
            "time": "  14:30  ",
            "target_timezone": "   Europe/London   "
        }"#;
        let request: ToolRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.source_timezone.as_deref(), Some("America/New_York"));
        assert_eq!(request.time.as_deref(), Some("14:30"));
        assert_eq!(request.target_timezone.as_deref(), Some("Europe/London"));
        assert_eq!(request.timezone, None);
    }

    #[test]
    fn test_request_requires_action() {
        let result = serde_json::from_str::<ToolRequest>(r#"{"timezone": "UTC"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("get_current_time".parse::<Action>(), Ok(Action::GetCurrentTime));
        assert_eq!("convert_time".parse::<Action>(), Ok(Action::ConvertTime));
        assert_eq!(
            "delete_time".parse::<Action>(),
            Err(TimeToolError::InvalidAction {
                action: "delete_time".to_string()
            })
        );
    }
}
