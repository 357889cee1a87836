use chrono::{DateTime, NaiveTime, TimeZone, Timelike};
use chrono_tz::{OffsetComponents, Tz};

use crate::core::error::{TimeToolError, TimeToolResult};

// Constants for format strings
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
pub const DATETIME_MICROS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";
pub const TIME_INPUT_FORMAT: &str = "HH:MM";

/// Zone used for any timezone field the caller leaves out
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Available resource URIs for the time tool server
pub const AVAILABLE_RESOURCES: &[&str] = &["time://status", "time://help", "time://descriptor"];

/// Parse a strict 24-hour `HH:MM` wall-clock time.
///
/// Both fields must be two digits. Seconds, 12-hour markers and
/// unpadded hours such as `9:30` are rejected.
pub fn parse_wall_clock(time_str: &str) -> TimeToolResult<NaiveTime> {
    let invalid = || TimeToolError::InvalidTimeFormat {
        time: time_str.to_string(),
    };

    let bytes = time_str.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }

    let two_digits = |hi: u8, lo: u8| -> Option<u32> {
        (hi.is_ascii_digit() && lo.is_ascii_digit())
            .then(|| u32::from(hi - b'0') * 10 + u32::from(lo - b'0'))
    };

    let hour = two_digits(bytes[0], bytes[1]).ok_or_else(invalid)?;
    let minute = two_digits(bytes[3], bytes[4]).ok_or_else(invalid)?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// Render a zoned datetime as ISO 8601 with a `±HH:MM` offset.
///
/// Sub-second precision is only emitted when present, at microsecond
/// resolution.
pub fn format_iso8601<Z>(dt: &DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: std::fmt::Display,
{
    let format = if dt.nanosecond() == 0 {
        DATETIME_FORMAT
    } else {
        DATETIME_MICROS_FORMAT
    };
    dt.format(format).to_string()
}

/// Format a time difference in hours
///
/// # Arguments
///
/// * `hours_difference` - The time difference in hours
///
/// # Returns
///
/// Whole hours keep one decimal place (`+9.0h`), fractional hours keep up to
/// two with trailing zeros removed (`+5.5h`, `+5.75h`). The sign is always
/// explicit.
pub fn format_time_difference(hours_difference: f64) -> String {
    // Collapse -0.0 so that a zero delta renders as "+0.0h".
    let hours = if hours_difference == 0.0 {
        0.0
    } else {
        hours_difference
    };

    if hours.fract() == 0.0 {
        format!("{:+.1}h", hours)
    } else {
        let formatted = format!("{:+.2}", hours);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        format!("{}h", trimmed)
    }
}

/// Difference between the target and source UTC offsets, in hours
pub fn hours_difference(source_time: &DateTime<Tz>, target_time: &DateTime<Tz>) -> f64 {
    let source_offset = source_time.offset().base_utc_offset() + source_time.offset().dst_offset();
    let target_offset = target_time.offset().base_utc_offset() + target_time.offset().dst_offset();
    (target_offset - source_offset).num_seconds() as f64 / 3600.0
}

/// Calculate the formatted time difference between two zoned datetimes
pub fn calculate_time_difference(source_time: &DateTime<Tz>, target_time: &DateTime<Tz>) -> String {
    format_time_difference(hours_difference(source_time, target_time))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_format_time_difference() {
        // Whole hours keep a single decimal
        assert_eq!(format_time_difference(9.0), "+9.0h");
        assert_eq!(format_time_difference(-5.0), "-5.0h");
        assert_eq!(format_time_difference(0.0), "+0.0h");
        assert_eq!(format_time_difference(-0.0), "+0.0h");

        // Fractional hours
        assert_eq!(format_time_difference(3.5), "+3.5h");
        assert_eq!(format_time_difference(-2.75), "-2.75h");

        // Nepal (UTC+5:45)
        assert_eq!(format_time_difference(5.75), "+5.75h");
    }

    #[test]
    fn test_parse_wall_clock_accepts_padded_times() {
        assert_eq!(
            parse_wall_clock("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_wall_clock("00:00").unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_wall_clock("23:59").unwrap(),
            NaiveTime::from_hms_opt(23, 59, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_wall_clock_rejects_loose_input() {
        for input in [
            "9:30", "24:00", "12:60", "09:30:00", "9:30 PM", "09-30", "0930", "", "ab:cd", "+9:30",
            "٠٩:٣٠",
        ] {
            assert_eq!(
                parse_wall_clock(input),
                Err(TimeToolError::InvalidTimeFormat {
                    time: input.to_string()
                }),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_iso8601() {
        let dt = Utc
            .with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
            .unwrap()
            .with_timezone(&chrono_tz::Asia::Kolkata);
        assert_eq!(format_iso8601(&dt), "2024-01-15T17:30:00+05:30");

        let with_micros = dt + chrono::Duration::microseconds(1_500);
        assert_eq!(format_iso8601(&with_micros), "2024-01-15T17:30:00.001500+05:30");
    }

    #[test]
    fn test_calculate_time_difference() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let new_york = instant.with_timezone(&chrono_tz::America::New_York);
        let kathmandu = instant.with_timezone(&chrono_tz::Asia::Kathmandu);

        assert_eq!(calculate_time_difference(&new_york, &kathmandu), "+10.75h");
        assert_eq!(calculate_time_difference(&kathmandu, &new_york), "-10.75h");
    }
}
