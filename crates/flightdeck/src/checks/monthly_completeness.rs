//! Monthly completeness check.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde_json::{Map, json};

use crate::frame::Frame;
use crate::normalize::parse_timestamp;

use super::sample::sample_rows;
use super::{Check, CheckResult, CheckStatus};

/// Ensures each year covers a contiguous run of months.
///
/// Gaps between the first and last observed month of a year suggest a
/// reporting hole upstream; they warn rather than fail since sparse but
/// legitimate coverage exists.
#[derive(Debug, Default)]
pub struct MonthlyCompletenessCheck;

impl MonthlyCompletenessCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Check for MonthlyCompletenessCheck {
    fn name(&self) -> &'static str {
        "monthly_completeness"
    }

    fn run(&self, data: &Frame) -> CheckResult {
        let Some(starts) = data.column("start_time_utc") else {
            return CheckResult::new(
                self.name(),
                CheckStatus::Fail,
                "start_time_utc column missing",
            );
        };

        let mut unparseable = Vec::new();
        let mut months_by_year: BTreeMap<i32, Vec<u32>> = BTreeMap::new();
        for (row, cell) in starts.iter().enumerate() {
            match parse_timestamp(cell, None) {
                Some(ts) => {
                    let months = months_by_year.entry(ts.year()).or_default();
                    if !months.contains(&ts.month()) {
                        months.push(ts.month());
                    }
                }
                None => unparseable.push(row),
            }
        }

        if !unparseable.is_empty() {
            return CheckResult::new(
                self.name(),
                CheckStatus::Fail,
                "invalid datetimes in start_time_utc",
            )
            .with_details(json!({
                "invalid_count": unparseable.len(),
                "sample_rows": sample_rows(data, &unparseable),
            }));
        }

        let mut observed = Map::new();
        let mut missing = Map::new();
        for (year, months) in &mut months_by_year {
            months.sort_unstable();
            let first = months[0];
            let last = months[months.len() - 1];
            let gaps: Vec<u32> = (first..=last).filter(|m| !months.contains(m)).collect();
            if !gaps.is_empty() {
                missing.insert(year.to_string(), json!(gaps));
            }
            observed.insert(year.to_string(), json!(months));
        }

        if !missing.is_empty() {
            return CheckResult::new(
                self.name(),
                CheckStatus::Warn,
                "missing intermediate months detected",
            )
            .with_details(json!({
                "missing_months": missing,
                "observed": observed,
            }));
        }

        let mut result = CheckResult::new(
            self.name(),
            CheckStatus::Ok,
            "months are contiguous within each year",
        );
        if !observed.is_empty() {
            result = result.with_details(json!({ "observed": observed }));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Value;
    use chrono::{TimeZone, Utc};

    fn frame_with_months(dates: &[(i32, u32)]) -> Frame {
        Frame::from_columns(vec![(
            "start_time_utc".to_string(),
            dates
                .iter()
                .map(|(year, month)| {
                    Value::Timestamp(Utc.with_ymd_and_hms(*year, *month, 10, 9, 0, 0).unwrap())
                })
                .collect(),
        )])
        .unwrap()
    }

    #[test]
    fn test_contiguous_months_ok() {
        let frame = frame_with_months(&[(2024, 1), (2024, 2), (2024, 3)]);
        let result = MonthlyCompletenessCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.details.unwrap()["observed"]["2024"], json!([1, 2, 3]));
    }

    #[test]
    fn test_month_gap_warns() {
        let frame = frame_with_months(&[(2024, 1), (2024, 3)]);
        let result = MonthlyCompletenessCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Warn);
        let details = result.details.unwrap();
        assert_eq!(details["missing_months"]["2024"], json!([2]));
    }

    #[test]
    fn test_gap_reported_per_year() {
        let frame = frame_with_months(&[(2023, 11), (2023, 12), (2024, 5), (2024, 8)]);
        let result = MonthlyCompletenessCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Warn);
        let details = result.details.unwrap();
        assert!(details["missing_months"].get("2023").is_none());
        assert_eq!(details["missing_months"]["2024"], json!([6, 7]));
    }

    #[test]
    fn test_unparseable_start_fails() {
        let frame = Frame::from_columns(vec![(
            "start_time_utc".to_string(),
            vec![Value::Str("garbage".to_string()), Value::Null],
        )])
        .unwrap();
        let result = MonthlyCompletenessCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.details.unwrap()["invalid_count"], json!(2));
    }

    #[test]
    fn test_missing_column_fails() {
        let frame = Frame::new();
        let result = MonthlyCompletenessCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn test_empty_column_ok() {
        let frame = frame_with_months(&[]);
        let result = MonthlyCompletenessCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.details.is_none());
    }
}
