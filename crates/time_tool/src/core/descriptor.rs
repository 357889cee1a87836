use serde_json::{Map, Value, json};

use crate::config::SchemaPolicy;
use crate::core::models::Action;

pub const TOOL_NAME: &str = "time";
pub const TOOL_DESCRIPTION: &str =
    "Get current time in a specific timezone or convert time between timezones";
const SCHEMA_ID: &str = "https://github.com/sabry-awad97/rust-mcp-servers/agent-time-tool/input";

const TIMEZONE_FIELDS: [(&str, &str); 3] = [
    (
        "timezone",
        "IANA timezone name (e.g., 'America/New_York', 'Europe/London')",
    ),
    ("source_timezone", "Source IANA timezone name"),
    ("target_timezone", "Target IANA timezone name"),
];

/// Build the tool descriptor: description plus JSON input schema.
///
/// Under [`SchemaPolicy::Defaulted`] every timezone property advertises
/// `default_timezone` and only `action` is required. Under
/// [`SchemaPolicy::Strict`] the timezone properties carry no default and are
/// all required.
pub fn descriptor(policy: SchemaPolicy, default_timezone: &str) -> Value {
    tracing::debug!("Generating descriptor for the time tool ({:?})", policy);

    let mut properties = Map::new();
    properties.insert(
        "action".to_string(),
        json!({
            "type": "string",
            "enum": Action::ALL.iter().map(Action::as_str).collect::<Vec<_>>(),
            "description": "The action to perform (get_current_time or convert_time)"
        }),
    );

    for (name, description) in TIMEZONE_FIELDS {
        let mut property = json!({
            "type": "string",
            "description": description
        });
        if policy == SchemaPolicy::Defaulted {
            property["default"] = json!(default_timezone);
        }
        properties.insert(name.to_string(), property);
    }

    properties.insert(
        "time".to_string(),
        json!({
            "type": "string",
            "description": "Time in 24-hour format (HH:MM) (required for convert_time)"
        }),
    );

    let mut required = vec!["action"];
    if policy == SchemaPolicy::Strict {
        required.extend(TIMEZONE_FIELDS.iter().map(|(name, _)| *name));
    }

    json!({
        "name": TOOL_NAME,
        "description": TOOL_DESCRIPTION,
        "inputSchema": {
            "$id": SCHEMA_ID,
            "title": "Input for the Time tool",
            "type": "object",
            "properties": properties,
            "required": required
        }
    })
}
