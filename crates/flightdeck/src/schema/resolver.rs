//! Maps arbitrary source column names onto canonical field names.
//!
//! Source files arrive with aliased, abbreviated and non-Latin-script
//! headers. Resolution is permissive: headers with no known alias are left
//! untouched and the normalization engine decides their fate.

use std::collections::HashMap;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Known aliases per canonical column, stored pre-normalized.
///
/// The datetime targets are the raw `start_time`/`end_time` names; the
/// engine converts them to their `_utc` forms after timezone resolution.
static ALIASES: &[(&str, &[&str])] = &[
    (
        "flight_id",
        &[
            "flight_id",
            "flightno",
            "flight_no",
            "flightnumber",
            "номерполета",
            "flight",
        ],
    ),
    (
        "start_time",
        &[
            "start_time",
            "start",
            "start_datetime",
            "departure_time",
            "времянчала",
            "временавылета",
        ],
    ),
    (
        "end_time",
        &[
            "end_time",
            "end",
            "end_datetime",
            "arrival_time",
            "времязавершения",
            "времепосадки",
        ],
    ),
    (
        "duration_minutes",
        &[
            "duration",
            "duration_minutes",
            "duration_min",
            "продолжительность",
            "длительностьмин",
        ],
    ),
    ("region_code", &["region_code", "region", "regionid", "кодрегиона"]),
    ("region_name", &["region_name", "region_title", "названиерегиона"]),
    ("latitude", &["latitude", "lat", "широта"]),
    ("longitude", &["longitude", "lon", "lng", "долгота"]),
    ("vehicle_category", &["vehicle_category", "uav_type", "типбпла"]),
    ("operator_type", &["operator_type", "operator", "типоператора"]),
    ("flight_purpose", &["flight_purpose", "purpose", "цельвылета"]),
    ("payload_type", &["payload_type", "payload", "типнагрузки"]),
];

/// Normalized alias → canonical name lookup, built once.
static REVERSE_MAP: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut reverse = HashMap::new();
    for (canonical, aliases) in ALIASES {
        for alias in *aliases {
            reverse.insert(normalize_header(alias), *canonical);
        }
    }
    reverse
});

/// Normalize a header for matching: trim, lowercase, collapse runs of
/// non-alphanumeric characters to a single `_`, strip edge separators.
pub fn normalize_header(value: &str) -> String {
    let mut normalized = String::with_capacity(value.len());
    let mut pending_separator = false;
    for ch in value.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            pending_separator = false;
            for lower in ch.to_lowercase() {
                normalized.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }
    normalized
}

/// Resolves source headers against the alias table.
#[derive(Debug, Default)]
pub struct HeaderResolver;

impl HeaderResolver {
    pub fn new() -> Self {
        Self
    }

    /// The canonical name for a single header, if it is a known alias.
    pub fn canonical_for(&self, header: &str) -> Option<&'static str> {
        REVERSE_MAP.get(&normalize_header(header)).copied()
    }

    /// A rename mapping (source name → canonical name) covering every
    /// recognized header. Unrecognized headers are simply absent.
    pub fn resolve<I, S>(&self, headers: I) -> IndexMap<String, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mapping = IndexMap::new();
        for header in headers {
            let header = header.as_ref();
            if let Some(canonical) = self.canonical_for(header) {
                mapping.insert(header.to_string(), canonical.to_string());
            }
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header_basic() {
        assert_eq!(normalize_header("  Flight ID  "), "flight_id");
        assert_eq!(normalize_header("Start--Time"), "start_time");
        assert_eq!(normalize_header("__lat__"), "lat");
        assert_eq!(normalize_header("Duration (min)"), "duration_min");
    }

    #[test]
    fn test_normalize_header_cyrillic() {
        assert_eq!(normalize_header("Номер полета"), "номер_полета");
        assert_eq!(normalize_header("ШИРОТА"), "широта");
    }

    #[test]
    fn test_resolve_latin_aliases() {
        let resolver = HeaderResolver::new();
        let mapping = resolver.resolve(["FlightNo", "Departure Time", "lat", "weird_column"]);
        assert_eq!(mapping.get("FlightNo").map(String::as_str), Some("flight_id"));
        assert_eq!(
            mapping.get("Departure Time").map(String::as_str),
            Some("start_time")
        );
        assert_eq!(mapping.get("lat").map(String::as_str), Some("latitude"));
        assert!(!mapping.contains_key("weird_column"));
    }

    #[test]
    fn test_resolve_cyrillic_aliases() {
        let resolver = HeaderResolver::new();
        let mapping = resolver.resolve(["широта", "долгота", "кодрегиона"]);
        assert_eq!(mapping.get("широта").map(String::as_str), Some("latitude"));
        assert_eq!(mapping.get("долгота").map(String::as_str), Some("longitude"));
        assert_eq!(
            mapping.get("кодрегиона").map(String::as_str),
            Some("region_code")
        );
    }

    #[test]
    fn test_resolution_is_order_independent() {
        let resolver = HeaderResolver::new();
        let forward = resolver.resolve(["lat", "lon"]);
        let backward = resolver.resolve(["lon", "lat"]);
        assert_eq!(forward.get("lat"), backward.get("lat"));
        assert_eq!(forward.get("lon"), backward.get("lon"));
    }
}
