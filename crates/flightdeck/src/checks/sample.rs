//! Bounded row sampling for check payloads.

use crate::frame::Frame;

/// Upper bound on sampled rows embedded in a check's details.
pub const SAMPLE_LIMIT: usize = 5;

/// Render up to [`SAMPLE_LIMIT`] of the given rows as JSON objects.
pub fn sample_rows(data: &Frame, indexes: &[usize]) -> serde_json::Value {
    let sampled: Vec<serde_json::Value> = indexes
        .iter()
        .take(SAMPLE_LIMIT)
        .map(|&row| data.row_json(row))
        .collect();
    serde_json::Value::Array(sampled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Value;

    #[test]
    fn test_sample_is_bounded() {
        let frame = Frame::from_columns(vec![(
            "flight_id".to_string(),
            (0..10).map(|i| Value::Str(format!("F-{i}"))).collect(),
        )])
        .unwrap();
        let indexes: Vec<usize> = (0..10).collect();
        let sample = sample_rows(&frame, &indexes);
        assert_eq!(sample.as_array().unwrap().len(), SAMPLE_LIMIT);
        assert_eq!(sample[0]["flight_id"], "F-0");
    }
}
