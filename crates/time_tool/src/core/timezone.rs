use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::core::error::{TimeToolError, TimeToolResult};

/// Resolve an IANA timezone name against the bundled tz database
pub fn resolve_timezone(timezone_name: &str) -> TimeToolResult<Tz> {
    Tz::from_str(timezone_name).map_err(|_| TimeToolError::unknown_timezone(timezone_name))
}

/// Detect the system's local timezone, falling back to UTC
pub fn local_timezone() -> Tz {
    match iana_time_zone::get_timezone() {
        Ok(tz_name) => match tz_name.parse::<Tz>() {
            Ok(tz) => tz,
            Err(_) => {
                tracing::warn!("Could not parse timezone '{}', defaulting to UTC", tz_name);
                chrono_tz::UTC
            }
        },
        Err(_) => {
            tracing::warn!("Could not detect system timezone, defaulting to UTC");
            chrono_tz::UTC
        }
    }
}

/// Calendar date in `timezone` at the given instant
pub fn date_in(now: DateTime<Utc>, timezone: &Tz) -> NaiveDate {
    now.with_timezone(timezone).date_naive()
}

/// Build the zoned instant for a wall-clock time on `date` in `timezone`.
///
/// Repeated local times (DST fall-back) resolve to the earlier instant.
/// Skipped local times (DST spring-forward) are read with the offset in
/// force before the transition, which lands past the gap.
pub fn zoned_instant(date: NaiveDate, time: NaiveTime, timezone: &Tz) -> DateTime<Tz> {
    let local = date.and_time(time);

    timezone
        .from_local_datetime(&local)
        .earliest()
        .unwrap_or_else(|| {
            let offset_before = timezone
                .offset_from_utc_datetime(&(local - TimeDelta::days(1)))
                .fix();
            let utc = local - TimeDelta::seconds(i64::from(offset_before.local_minus_utc()));
            timezone.from_utc_datetime(&utc)
        })
}

/// The same absolute instant, expressed in `target`
pub fn convert_instant(instant: &DateTime<Tz>, target: &Tz) -> DateTime<Tz> {
    instant.with_timezone(target)
}
