use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    service::RequestContext,
    tool, tool_handler, tool_router,
};

use crate::config::Config;
use crate::core::{
    converter::TimeConverter,
    descriptor::descriptor,
    error::{McpResult, TimeToolError},
    models::ToolRequest,
    timezone::local_timezone,
};

/// MCP service exposing the time tool
#[derive(Clone)]
pub struct TimeToolService {
    converter: TimeConverter,
    local_timezone_name: String,
    tool_router: ToolRouter<TimeToolService>,
}

impl TimeToolService {
    pub fn new(config: Config) -> Self {
        Self::with_converter(TimeConverter::new(config))
    }

    pub fn with_converter(converter: TimeConverter) -> Self {
        Self {
            converter,
            local_timezone_name: local_timezone().name().to_string(),
            tool_router: Self::tool_router(),
        }
    }

    fn create_resource_text(&self, uri: &str, name: &str) -> Resource {
        RawResource::new(uri, name.to_string()).no_annotation()
    }

    pub(crate) fn get_local_timezone_name(&self) -> &str {
        &self.local_timezone_name
    }

    fn generate_status_content(&self) -> McpResult<String> {
        let current_time = self
            .converter
            .current_time(&self.local_timezone_name)?;
        let config = self.converter.config();

        Ok(format!(
            r#"Time Tool Server Status

Server: Running
Local Timezone: {}
Current Local Time: {}
DST Active: {}
Default Timezone: {}
Schema Policy: {:?}
Logging Level: {}

Actions:
- get_current_time
- convert_time"#,
            current_time.timezone,
            current_time.datetime,
            current_time.is_dst,
            config.default_timezone,
            config.schema_policy,
            config.logging_level
        ))
    }

    fn generate_help_content(&self) -> String {
        let default_timezone = &self.converter.config().default_timezone;
        format!(
            r#"Time Tool Help

TOOL: time

ACTIONS:
- get_current_time: Current time in a timezone
  - timezone: IANA timezone name (default: {default_timezone})
  - Example: {{"action": "get_current_time", "timezone": "America/New_York"}}

- convert_time: Convert a time of day between timezones
  - time: 24-hour HH:MM, required
  - source_timezone: IANA timezone name (default: {default_timezone})
  - target_timezone: IANA timezone name (default: {default_timezone})
  - Example: {{"action": "convert_time", "source_timezone": "America/Los_Angeles", "time": "09:00", "target_timezone": "Europe/Paris"}}

RESOURCES:
- time://status: Current server status and local time
- time://help: This help documentation
- time://descriptor: JSON descriptor of the tool input

NOTES:
- The date used by convert_time is today in the source timezone
- The target date may differ from the source date
- time_difference is target offset minus source offset, e.g. "+5.5h"
- Times like '9:30' or '24:00' are rejected; use '09:30' and '00:00'"#
        )
    }

    fn generate_descriptor_content(&self) -> McpResult<String> {
        let config = self.converter.config();
        let descriptor = descriptor(config.schema_policy, &config.default_timezone);
        serde_json::to_string_pretty(&descriptor)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }
}

impl Default for TimeToolService {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[tool_router]
impl TimeToolService {
    #[tool(
        name = "time",
        description = "Get current time in a specific timezone or convert time between timezones"
    )]
    pub(crate) async fn invoke(
        &self,
        Parameters(req): Parameters<ToolRequest>,
    ) -> McpResult<CallToolResult> {
        let output = self.converter.invoke(&req)?;
        let text = serde_json::to_string_pretty(&output)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for TimeToolService {
    fn get_info(&self) -> ServerInfo {
        let config = self.converter.config();
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Time tool server. Tool: time with actions get_current_time and convert_time. Default timezone: {}. Local timezone: {}. Use IANA timezone names and HH:MM times.",
                config.default_timezone,
                self.get_local_timezone_name()
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource_text("time://status", "server-status"),
                self.create_resource_text("time://help", "help-documentation"),
                self.create_resource_text("time://descriptor", "tool-descriptor"),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ReadResourceResult> {
        let text = match uri.as_str() {
            "time://status" => self.generate_status_content()?,
            "time://help" => self.generate_help_content(),
            "time://descriptor" => self.generate_descriptor_content()?,
            _ => {
                return Err(TimeToolError::ResourceNotFound {
                    uri: uri.to_string(),
                }
                .into());
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ListResourceTemplatesResult> {
        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: Vec::new(),
        })
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<InitializeResult> {
        tracing::info!("Time tool server initialized successfully");
        Ok(self.get_info())
    }
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    use rmcp::{ServiceExt, transport::stdio};

    let service = TimeToolService::new(config)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}
