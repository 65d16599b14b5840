//! Canonical field names for normalized flight-activity records.

/// Fixed column order every canonical table exposes, regardless of source.
pub const CANONICAL_ORDER: [&str; 14] = [
    "flight_id",
    "surrogate_id",
    "start_time_utc",
    "end_time_utc",
    "duration_minutes",
    "region_code",
    "region_name",
    "latitude",
    "longitude",
    "vehicle_category",
    "operator_type",
    "flight_purpose",
    "payload_type",
    "superseded",
];

/// Canonical fields holding free text.
pub const STRING_FIELDS: [&str; 8] = [
    "flight_id",
    "surrogate_id",
    "region_code",
    "region_name",
    "vehicle_category",
    "operator_type",
    "flight_purpose",
    "payload_type",
];

/// Canonical fields coerced to floating point.
pub const NUMERIC_FIELDS: [&str; 3] = ["duration_minutes", "latitude", "longitude"];

/// Canonical boolean fields.
pub const BOOLEAN_FIELDS: [&str; 1] = ["superseded"];

/// Fields that must be non-null in a valid canonical table.
pub const REQUIRED_FIELDS: [&str; 4] = [
    "flight_id",
    "start_time_utc",
    "end_time_utc",
    "duration_minutes",
];

/// Datetime columns as they appear in raw sources, before conversion
/// to their `_utc` counterparts.
pub const RAW_DATETIME_FIELDS: [&str; 2] = ["start_time", "end_time"];
