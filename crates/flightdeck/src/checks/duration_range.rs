//! Duration range check.

use serde_json::json;

use crate::frame::Frame;

use super::sample::sample_rows;
use super::{Check, CheckResult, CheckStatus};

/// Ensures flight durations fall within realistic boundaries.
#[derive(Debug)]
pub struct DurationRangeCheck {
    minimum: f64,
    maximum: f64,
}

impl DurationRangeCheck {
    /// Default bounds: one minute to a full day.
    pub fn new() -> Self {
        Self::with_bounds(1.0, 24.0 * 60.0)
    }

    pub fn with_bounds(minimum: f64, maximum: f64) -> Self {
        Self { minimum, maximum }
    }
}

impl Default for DurationRangeCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl Check for DurationRangeCheck {
    fn name(&self) -> &'static str {
        "duration_range"
    }

    fn run(&self, data: &Frame) -> CheckResult {
        let Some(durations) = data.column("duration_minutes") else {
            return CheckResult::new(
                self.name(),
                CheckStatus::Fail,
                "duration_minutes column missing",
            );
        };

        let invalid: Vec<usize> = durations
            .iter()
            .enumerate()
            .filter_map(|(row, cell)| {
                cell.as_num()
                    .filter(|&minutes| minutes < self.minimum || minutes > self.maximum)
                    .map(|_| row)
            })
            .collect();

        let mut details = json!({
            "minimum": self.minimum,
            "maximum": self.maximum,
            "invalid_count": invalid.len(),
        });

        if invalid.is_empty() {
            return CheckResult::new(self.name(), CheckStatus::Ok, "all durations within expected range")
                .with_details(details);
        }

        details["sample_rows"] = sample_rows(data, &invalid);
        CheckResult::new(
            self.name(),
            CheckStatus::Fail,
            format!("found {} durations outside range", invalid.len()),
        )
        .with_details(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Value;

    fn frame_with_durations(values: &[Option<f64>]) -> Frame {
        Frame::from_columns(vec![
            (
                "flight_id".to_string(),
                (0..values.len()).map(|i| Value::Str(format!("F-{i}"))).collect(),
            ),
            (
                "duration_minutes".to_string(),
                values
                    .iter()
                    .map(|v| v.map(Value::Num).unwrap_or(Value::Null))
                    .collect(),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_ok_within_bounds() {
        let frame = frame_with_durations(&[Some(30.0), Some(1.0), Some(1440.0), None]);
        let result = DurationRangeCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.details.unwrap()["invalid_count"], json!(0));
    }

    #[test]
    fn test_negative_duration_fails() {
        let frame = frame_with_durations(&[Some(-5.0), Some(30.0)]);
        let result = DurationRangeCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Fail);
        let details = result.details.unwrap();
        assert_eq!(details["invalid_count"], json!(1));
        assert_eq!(details["sample_rows"][0]["flight_id"], json!("F-0"));
    }

    #[test]
    fn test_missing_column_fails() {
        let frame = Frame::from_columns(vec![(
            "flight_id".to_string(),
            vec![Value::Str("F-1".to_string())],
        )])
        .unwrap();
        let result = DurationRangeCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.summary.contains("missing"));
    }

    #[test]
    fn test_custom_bounds() {
        let frame = frame_with_durations(&[Some(30.0)]);
        let result = DurationRangeCheck::with_bounds(60.0, 120.0).run(&frame);
        assert_eq!(result.status, CheckStatus::Fail);
    }
}
