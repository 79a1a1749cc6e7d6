//! Date formatting for cards.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

pub const UNKNOWN_DATE: &str = "Unknown";
pub const INVALID_DATE: &str = "Invalid date";

/// Formats a backend timestamp as a short local date, e.g. `3/1/2024`.
pub fn format_date(value: Option<&str>) -> String {
    format_date_in(value, &Local)
}

/// Same as [`format_date`] but in an explicit time zone.
pub fn format_date_in<Tz>(value: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => UNKNOWN_DATE.to_string(),
        Some(raw) => match parse_timestamp(raw, tz) {
            Some(date) => date.format("%-m/%-d/%Y").to_string(),
            None => INVALID_DATE.to_string(),
        },
    }
}

/// Accepts RFC 3339, zone-less date-times (read as local time) and plain dates (read as UTC).
fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(tz));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight).with_timezone(tz))
}
