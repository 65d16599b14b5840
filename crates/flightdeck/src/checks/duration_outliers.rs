//! Duration outlier detection using interquartile-range fences.

use serde_json::json;

use crate::frame::Frame;

use super::sample::sample_rows;
use super::{Check, CheckResult, CheckStatus};

/// Flags unusually long or short flights.
///
/// Outliers are advisory (WARN): extreme durations are often legitimate,
/// so they never fail a dataset on their own.
#[derive(Debug, Default)]
pub struct DurationOutlierCheck;

impl DurationOutlierCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Check for DurationOutlierCheck {
    fn name(&self) -> &'static str {
        "duration_outliers"
    }

    fn run(&self, data: &Frame) -> CheckResult {
        let Some(durations) = data.column("duration_minutes") else {
            return CheckResult::new(
                self.name(),
                CheckStatus::Fail,
                "duration_minutes column missing",
            );
        };

        let mut values: Vec<f64> = durations.iter().filter_map(|cell| cell.as_num()).collect();
        if values.is_empty() {
            return CheckResult::new(
                self.name(),
                CheckStatus::Warn,
                "no duration values available for outlier detection",
            );
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&values, 0.25);
        let q3 = quantile(&values, 0.75);
        let iqr = q3 - q1;
        let lower = q1 - 1.5 * iqr;
        let upper = q3 + 1.5 * iqr;

        let outliers: Vec<usize> = durations
            .iter()
            .enumerate()
            .filter_map(|(row, cell)| {
                cell.as_num()
                    .filter(|&minutes| minutes < lower || minutes > upper)
                    .map(|_| row)
            })
            .collect();

        let mut details = json!({
            "thresholds": { "lower": lower, "upper": upper },
            "outlier_count": outliers.len(),
        });

        if outliers.is_empty() {
            return CheckResult::new(self.name(), CheckStatus::Ok, "no duration outliers detected")
                .with_details(details);
        }

        details["sample_rows"] = sample_rows(data, &outliers);
        CheckResult::new(
            self.name(),
            CheckStatus::Warn,
            format!("detected {} potential duration outliers", outliers.len()),
        )
        .with_details(details)
    }
}

/// Quantile with linear interpolation between the two nearest ranks.
/// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let low = position.floor() as usize;
    let high = position.ceil() as usize;
    if low == high {
        return sorted[low];
    }
    let weight = position - low as f64;
    sorted[low] * (1.0 - weight) + sorted[high] * weight
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
    fn test_quantile_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.25), 1.75);
        assert_eq!(quantile(&values, 0.75), 3.25);
        assert_eq!(quantile(&values, 0.5), 2.5);
        assert_eq!(quantile(&[7.0], 0.25), 7.0);
    }

    #[test]
    fn test_uniform_durations_ok() {
        let frame = frame_with_durations(&[Some(60.0), Some(62.0), Some(58.0), Some(61.0)]);
        let result = DurationOutlierCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.details.unwrap()["outlier_count"], json!(0));
    }

    #[test]
    fn test_extreme_duration_warns() {
        let frame = frame_with_durations(&[
            Some(60.0),
            Some(62.0),
            Some(58.0),
            Some(61.0),
            Some(59.0),
            Some(900.0),
        ]);
        let result = DurationOutlierCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Warn);
        let details = result.details.unwrap();
        assert_eq!(details["outlier_count"], json!(1));
        assert_eq!(details["sample_rows"][0]["flight_id"], json!("F-5"));
    }

    #[test]
    fn test_no_usable_durations_warn() {
        let frame = frame_with_durations(&[None, None]);
        let result = DurationOutlierCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Warn);
        assert!(result.summary.contains("no duration values"));
    }

    #[test]
    fn test_missing_column_fails() {
        let frame = Frame::new();
        let result = DurationOutlierCheck::new().run(&frame);
        assert_eq!(result.status, CheckStatus::Fail);
    }
}
