use std::sync::Arc;

use chrono::{DateTime, NaiveTime};
use chrono_tz::Tz;

use crate::config::Config;
use crate::core::{
    clock::{Clock, SystemClock},
    error::{TimeToolError, TimeToolResult},
    models::{Action, TimeConversionResult, TimeResult, ToolOutput, ToolRequest},
    timezone::{convert_instant, date_in, resolve_timezone, zoned_instant},
    utils::{self, parse_wall_clock},
};

/// Zoned-time converter behind the time tool.
///
/// Holds no mutable state; clones share the clock.
#[derive(Clone)]
pub struct TimeConverter {
    clock: Arc<dyn Clock>,
    config: Config,
}

impl TimeConverter {
    /// Converter reading the system clock
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        Self { clock, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current instant in `timezone_name`
    pub fn current_time(&self, timezone_name: &str) -> TimeToolResult<TimeResult> {
        let timezone = resolve_timezone(timezone_name)?;
        let current_time = self.clock.now().with_timezone(&timezone);
        tracing::info!("Current time in {}: {}", timezone_name, current_time);

        Ok(TimeResult::from_datetime(&current_time, timezone_name))
    }

    /// Convert `time_str` (HH:MM, today in the source zone) from `source_tz` to `target_tz`
    pub fn convert_time(
        &self,
        source_tz: &str,
        time_str: &str,
        target_tz: &str,
    ) -> TimeToolResult<TimeConversionResult> {
        let parsed_time = parse_wall_clock(time_str)?;
        let source_timezone = resolve_timezone(source_tz)?;
        let target_timezone = resolve_timezone(target_tz)?;

        let (source_time, target_time) =
            self.perform_time_conversion(&source_timezone, parsed_time, &target_timezone);

        let time_difference = utils::calculate_time_difference(&source_time, &target_time);
        tracing::info!("Time converted from {} to {}", source_tz, target_tz);

        Ok(TimeConversionResult {
            source: TimeResult::from_datetime(&source_time, source_tz),
            target: TimeResult::from_datetime(&target_time, target_tz),
            time_difference,
        })
    }

    fn perform_time_conversion(
        &self,
        source_tz: &Tz,
        parsed_time: NaiveTime,
        target_tz: &Tz,
    ) -> (DateTime<Tz>, DateTime<Tz>) {
        let today = date_in(self.clock.now(), source_tz);
        let source_time = zoned_instant(today, parsed_time, source_tz);
        let target_time = convert_instant(&source_time, target_tz);
        (source_time, target_time)
    }

    /// Dispatch a tool request on its `action`
    pub fn invoke(&self, request: &ToolRequest) -> TimeToolResult<ToolOutput> {
        tracing::info!("Invoking action: {}", request.action);
        tracing::debug!("Input arguments: {:?}", request);

        let result = request
            .action
            .parse::<Action>()
            .and_then(|action| match action {
                Action::GetCurrentTime => self.invoke_current_time(request),
                Action::ConvertTime => self.invoke_convert_time(request),
            });

        if let Err(e) = &result {
            tracing::error!("Action '{}' failed: {}", request.action, e);
        }
        result
    }

    fn invoke_current_time(&self, request: &ToolRequest) -> TimeToolResult<ToolOutput> {
        let timezone = self.timezone_field(request.timezone.as_deref(), "timezone")?;
        self.current_time(timezone).map(ToolOutput::CurrentTime)
    }

    fn invoke_convert_time(&self, request: &ToolRequest) -> TimeToolResult<ToolOutput> {
        let time = request
            .time
            .as_deref()
            .ok_or_else(|| TimeToolError::missing_field("time"))?;
        let source_tz =
            self.timezone_field(request.source_timezone.as_deref(), "source_timezone")?;
        let target_tz =
            self.timezone_field(request.target_timezone.as_deref(), "target_timezone")?;

        self.convert_time(source_tz, time, target_tz)
            .map(ToolOutput::Conversion)
    }

    fn timezone_field<'a>(
        &'a self,
        value: Option<&'a str>,
        field: &str,
    ) -> TimeToolResult<&'a str> {
        match value {
            Some(timezone) => Ok(timezone),
            None if self.config.strict() => Err(TimeToolError::missing_field(field)),
            None => Ok(self.config.default_timezone.as_str()),
        }
    }
}

impl Default for TimeConverter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
