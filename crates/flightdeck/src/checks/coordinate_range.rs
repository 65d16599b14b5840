//! Coordinate range check.
//!
//! Defense in depth: normalization already nulls out-of-range axes, so a
//! hit here points at data that bypassed normalization or a defect in it.

use serde_json::json;

use crate::frame::Frame;

use super::sample::sample_rows;
use super::{Check, CheckResult, CheckStatus};

/// Ensures latitude and longitude stay within geographic bounds.
#[derive(Debug, Default)]
pub struct CoordinateRangeCheck;

impl CoordinateRangeCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Check for CoordinateRangeCheck {
    fn name(&self) -> &'static str {
        "coordinate_range"
    }

    fn run(&self, data: &Frame) -> CheckResult {
        let (Some(latitudes), Some(longitudes)) =
            (data.column("latitude"), data.column("longitude"))
        else {
            return CheckResult::new(
                self.name(),
                CheckStatus::Warn,
                "latitude/longitude columns not available",
            );
        };

        if data.is_empty() {
            return CheckResult::new(
                self.name(),
                CheckStatus::Warn,
                "no coordinate values to evaluate",
            );
        }

        let invalid: Vec<usize> = (0..data.row_count())
            .filter(|&row| {
                let bad_lat = latitudes[row]
                    .as_num()
                    .is_some_and(|lat| !(-90.0..=90.0).contains(&lat));
                let bad_lon = longitudes[row]
                    .as_num()
                    .is_some_and(|lon| !(-180.0..=180.0).contains(&lon));
                bad_lat || bad_lon
            })
            .collect();

        if invalid.is_empty() {
            return CheckResult::new(
                self.name(),
                CheckStatus::Ok,
                "coordinates fall within expected bounds",
            );
        }

        CheckResult::new(
            self.name(),
            CheckStatus::Fail,
            format!("found {} coordinates outside geographic bounds", invalid.len()),
        )
        .with_details(json!({
            "invalid_count": invalid.len(),
            "sample_rows": sample_rows(data, &invalid),
        }))
    }
}
