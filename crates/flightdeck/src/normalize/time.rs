//! Free-form timestamp parsing with timezone resolution.
//!
//! Source reports carry date/time text in whatever shape the reporting
//! system produced. Values without an explicit offset are interpreted in
//! the report's timezone hint (IANA name) when one is available, otherwise
//! UTC; the result is always normalized to UTC. Parsing is total:
//! unusable text yields `None`, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::frame::Value;

/// Naive formats tried in order for offset-less values.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only formats, resolved to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y"];

/// Parse a raw cell into a UTC timestamp.
pub fn parse_timestamp(value: &Value, tz_hint: Option<&str>) -> Option<DateTime<Utc>> {
    match value {
        Value::Timestamp(t) => Some(*t),
        Value::Null | Value::Bool(_) | Value::Num(_) => None,
        Value::Str(text) => parse_text(text, tz_hint),
    }
}

fn parse_text(text: &str, tz_hint: Option<&str>) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    // Values with an explicit offset ignore the hint entirely.
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%z") {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(localize(naive, tz_hint));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(localize(date.and_hms_opt(0, 0, 0)?, tz_hint));
        }
    }

    None
}

/// Attach the hint timezone (or UTC) to a naive value and convert to UTC.
fn localize(naive: NaiveDateTime, tz_hint: Option<&str>) -> DateTime<Utc> {
    let tz = hint_timezone(tz_hint);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        // DST gap: fall back to reading the wall clock as UTC.
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// An unknown or absent hint falls back to UTC rather than erroring.
fn hint_timezone(tz_hint: Option<&str>) -> Tz {
    tz_hint
        .and_then(|hint| hint.trim().parse::<Tz>().ok())
        .unwrap_or(chrono_tz::UTC)
}
