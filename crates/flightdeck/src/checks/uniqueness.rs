//! Uniqueness check over the natural key dimensions.
//!
//! Deliberately agnostic to the `superseded` flag: normalization should
//! have left at most one non-superseded row per key, but this check looks
//! at every retained row so a dedup defect upstream still surfaces.

use std::collections::HashMap;

use serde_json::json;

use crate::frame::Frame;

use super::sample::sample_rows;
use super::{Check, CheckResult, CheckStatus};

const KEY_COLUMNS: [&str; 3] = ["flight_id", "start_time_utc", "region_code"];

/// Validates uniqueness of `(flight_id, start_time_utc, region_code)`.
#[derive(Debug, Default)]
pub struct UniquenessCheck;

impl UniquenessCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Check for UniquenessCheck {
    fn name(&self) -> &'static str {
        "uniqueness"
    }

    fn run(&self, data: &Frame) -> CheckResult {
        let missing: Vec<&str> = KEY_COLUMNS
            .iter()
            .copied()
            .filter(|column| !data.has_column(column))
            .collect();
        if !missing.is_empty() {
            return CheckResult::new(
                self.name(),
                CheckStatus::Fail,
                format!("missing key columns: {}", missing.join(", ")),
            );
        }

        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for row in 0..data.row_count() {
            let key = KEY_COLUMNS
                .iter()
                .map(|column| {
                    data.value(column, row)
                        .map(|cell| cell.to_json().to_string())
                        .unwrap_or_default()
                })
                .collect::<Vec<_>>()
                .join("|");
            groups.entry(key).or_default().push(row);
        }

        let mut duplicate_rows: Vec<usize> = groups
            .values()
            .filter(|rows| rows.len() > 1)
            .flatten()
            .copied()
            .collect();
        duplicate_rows.sort_unstable();

        if duplicate_rows.is_empty() {
            return CheckResult::new(
                self.name(),
                CheckStatus::Ok,
                "primary key combination is unique",
            );
        }

        CheckResult::new(
            self.name(),
            CheckStatus::Fail,
            format!("found {} duplicate key rows", duplicate_rows.len()),
        )
        .with_details(json!({
            "duplicate_count": duplicate_rows.len(),
            "sample_rows": sample_rows(data, &duplicate_rows),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Value;
    use chrono::{TimeZone, Utc};

    fn key_frame(rows: &[(&str, u32, &str)]) -> Frame {
        Frame::from_columns(vec![
            (
                "flight_id".to_string(),
                rows.iter().map(|(id, _, _)| Value::Str(id.to_string())).collect(),
            ),
            (
                "start_time_utc".to_string(),
                rows.iter()
                    .map(|(_, hour, _)| {
                        Value::Timestamp(Utc.with_ymd_and_hms(2024, 5, 1, *hour, 0, 0).unwrap())
                    })
                    .collect(),
            ),
            (
                "region_code".to_string(),
                rows.iter().map(|(_, _, region)| Value::Str(region.to_string())).collect(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_unique_keys_ok() {
        let frame = key_frame(&[("F-1", 10, "77"), ("F-1", 11, "77"), ("F-2", 10, "77")]);
        let result = UniquenessCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Ok);
    }

    #[test]
    fn test_duplicate_keys_fail_with_all_members() {
        let frame = key_frame(&[("F-1", 10, "77"), ("F-1", 10, "77"), ("F-2", 10, "77")]);
        let result = UniquenessCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Fail);
        let details = result.details.unwrap();
        assert_eq!(details["duplicate_count"], json!(2));
    }

    #[test]
    fn test_missing_key_column_fails() {
        let frame = Frame::from_columns(vec![(
            "flight_id".to_string(),
            vec![Value::Str("F-1".to_string())],
        )])
        .unwrap();
        let result = UniquenessCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.summary.contains("start_time_utc"));
    }
}
