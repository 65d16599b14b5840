//! Column-oriented table of loosely typed cells.
//!
//! `Frame` is the in-memory structure both engines operate on: raw sources
//! are loaded into a frame of untyped cells, the normalization engine
//! rewrites it column by column, and the quality checks read it without
//! mutating anything.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::json;

use crate::error::{FlightdeckError, Result};

/// Timestamp format used when rendering cells for reports and samples.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A single cell value.
///
/// Raw sources carry arbitrary text and numbers; coercion into the right
/// shape is total and never errors, yielding `None` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Str(String),
    Num(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Whether this cell carries no value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerce to text. Numbers and booleans render as text; null stays absent.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Str(s) => Some(s.clone()),
            Value::Num(n) => Some(format_num(*n)),
            Value::Bool(b) => Some(b.to_string()),
            Value::Timestamp(t) => Some(t.format(TIMESTAMP_FORMAT).to_string()),
        }
    }

    /// Coerce to a float. Non-numeric text yields `None`.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// The timestamp carried by this cell, if any.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Render as a JSON value for report payloads.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Str(s) => json!(s),
            Value::Num(n) => json!(n),
            Value::Bool(b) => json!(b),
            Value::Timestamp(t) => json!(t.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

/// Render a float without a trailing `.0` when it is integral.
fn format_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// An ordered collection of equally sized columns.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    columns: IndexMap<String, Vec<Value>>,
    rows: usize,
}

impl Frame {
    /// Create an empty frame with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from named columns, checking that lengths agree.
    pub fn from_columns(columns: Vec<(String, Vec<Value>)>) -> Result<Self> {
        let mut frame = Frame::new();
        for (name, values) in columns {
            frame.insert_column(name, values)?;
        }
        Ok(frame)
    }

    /// Assemble a frame from columns already known to be uniform.
    pub(crate) fn from_parts(columns: IndexMap<String, Vec<Value>>, rows: usize) -> Self {
        debug_assert!(columns.values().all(|v| v.len() == rows));
        Frame { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in their stored order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|s| s.as_str()).collect()
    }

    /// All values of a column.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// A single cell.
    pub fn value(&self, name: &str, row: usize) -> Option<&Value> {
        self.columns.get(name).and_then(|v| v.get(row))
    }

    /// Insert or replace a column. The first column fixes the row count;
    /// every later column must match it.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> Result<()> {
        if self.columns.is_empty() {
            self.rows = values.len();
        } else if values.len() != self.rows {
            return Err(FlightdeckError::Structural(format!(
                "column has {} values, expected {}",
                values.len(),
                self.rows
            )));
        }
        self.columns.insert(name.into(), values);
        Ok(())
    }

    /// Remove a column, preserving the order of the rest.
    pub fn drop_column(&mut self, name: &str) {
        self.columns.shift_remove(name);
    }

    /// One row rendered as a JSON object keyed by column name.
    pub fn row_json(&self, row: usize) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (name, values) in &self.columns {
            let cell = values.get(row).map(|v| v.to_json()).unwrap_or_default();
            object.insert(name.clone(), cell);
        }
        serde_json::Value::Object(object)
    }

    /// All rows rendered as JSON objects.
    pub fn to_json_rows(&self) -> Vec<serde_json::Value> {
        (0..self.rows).map(|row| self.row_json(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_value_coercions() {
        assert_eq!(Value::Str(" 4.5 ".into()).as_num(), Some(4.5));
        assert_eq!(Value::Str("abc".into()).as_num(), None);
        assert_eq!(Value::Num(7.0).as_text().as_deref(), Some("7"));
        assert_eq!(Value::Null.as_text(), None);
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_timestamp_json_rendering() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(Value::Timestamp(ts).to_json(), json!("2024-03-01T12:30:00Z"));
    }

    #[test]
    fn test_ragged_column_rejected() {
        let mut frame = Frame::new();
        frame
            .insert_column("a", vec![Value::Num(1.0), Value::Num(2.0)])
            .unwrap();
        let err = frame.insert_column("b", vec![Value::Null]).unwrap_err();
        assert!(matches!(err, FlightdeckError::Structural(_)));
    }

    #[test]
    fn test_drop_column_preserves_order() {
        let mut frame = Frame::from_columns(vec![
            ("a".into(), vec![Value::Num(1.0)]),
            ("b".into(), vec![Value::Num(2.0)]),
            ("c".into(), vec![Value::Num(3.0)]),
        ])
        .unwrap();
        frame.drop_column("b");
        assert_eq!(frame.column_names(), vec!["a", "c"]);
        assert_eq!(frame.column_count(), 2);
    }
}
