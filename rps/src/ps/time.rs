//! START and TIME columns.

use chrono::{DateTime, TimeZone, Timelike};
use std::fmt::Display;

/// Placeholder for timestamps chrono cannot represent.
const UNKNOWN: &str = "?";

/// Unix timestamp of the most recent midnight in `now`'s zone: `now` floored
/// to its hour, then stepped back by the hour of day.
pub fn midnight_of<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let into_hour = i64::from(now.minute()) * 60 + i64::from(now.second());
    now.timestamp() - into_hour - i64::from(now.hour()) * 3600
}

/// START column: `HH:MM` for processes started today, `MM/DD` otherwise.
/// Both are rendered in `now`'s time zone.
pub fn format_start<Tz>(start_unix: i64, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let Some(start) = DateTime::from_timestamp(start_unix, 0) else {
        return UNKNOWN.to_string();
    };
    let start = start.with_timezone(&now.timezone());
    let fmt = if start_unix < midnight_of(now) {
        "%m/%d"
    } else {
        "%H:%M"
    };
    start.format(fmt).to_string()
}

/// TIME column: the minute and second of `cpu_unix` read as a UTC timestamp,
/// as `M:SS`.
///
/// Hours are dropped, so an hour of CPU or more wraps back to `0:00`. Agents
/// and downstream tooling rely on this narrow rendering.
pub fn format_elapsed(cpu_unix: i64) -> String {
    DateTime::from_timestamp(cpu_unix, 0)
        .map(|t| t.format("%-M:%S").to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}
