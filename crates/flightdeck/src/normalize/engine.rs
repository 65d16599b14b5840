//! The normalization engine.
//!
//! Reduces an arbitrary raw table to the fixed canonical schema: resolves
//! headers, normalizes timestamps to UTC, derives durations, heals
//! coordinates, synthesizes identifiers, filters invalid rows and marks
//! duplicates. The engine is total over any input shape; individual rows
//! degrade to null or invalid rather than raising.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::frame::{Frame, Value};
use crate::schema::{CANONICAL_ORDER, HeaderResolver, RAW_DATETIME_FIELDS, STRING_FIELDS};

use super::surrogate::surrogate_id;
use super::time::parse_timestamp;

/// Second-precision key component used for deduplication.
const DEDUP_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Row accounting for one normalization run.
///
/// `total` counts raw input rows; `invalid` and `duplicates` are
/// independent (duplicates are computed only over rows that passed the
/// validity mask).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub total: usize,
    pub invalid: usize,
    pub duplicates: usize,
}

/// Normalize a raw table into the canonical schema.
///
/// `tz_hint` is an IANA timezone name applied to timestamps that carry no
/// explicit offset (typically derived from source metadata).
pub fn normalize(raw: &Frame, tz_hint: Option<&str>) -> (Frame, Counters) {
    // Step 1: resolve headers and discard columns outside the canonical
    // schema. When two source columns map to the same canonical name the
    // first one wins.
    let resolver = HeaderResolver::new();
    let renames = resolver.resolve(raw.column_names());
    let mut cols: IndexMap<String, Vec<Value>> = IndexMap::new();
    for name in raw.column_names() {
        let target = renames.get(name).map(String::as_str).unwrap_or(name);
        let recognized =
            CANONICAL_ORDER.contains(&target) || RAW_DATETIME_FIELDS.contains(&target);
        if !recognized || cols.contains_key(target) {
            continue;
        }
        let values = raw.column(name).map(<[Value]>::to_vec).unwrap_or_default();
        cols.insert(target.to_string(), values);
    }

    // Step 2: zero rows short-circuit to an empty canonical table. The
    // count comes from the source frame so rows survive the accounting
    // even when no column was recognized.
    let n = raw.row_count();
    if n == 0 {
        return (empty_canonical(), Counters::default());
    }

    // Step 3: coerce canonical string fields to trimmed text.
    for field in STRING_FIELDS {
        if let Some(col) = cols.get_mut(field) {
            for cell in col.iter_mut() {
                *cell = match cell.as_text() {
                    Some(text) => Value::Str(text.trim().to_string()),
                    None => Value::Null,
                };
            }
        }
    }

    // Step 4: resolve timestamps to UTC. Raw datetime columns replace
    // their `_utc` counterparts and are dropped; unparseable text degrades
    // to null and is caught by the validity mask.
    for raw_name in RAW_DATETIME_FIELDS {
        let target = format!("{raw_name}_utc");
        if let Some(col) = cols.shift_remove(raw_name) {
            cols.insert(target, col);
        }
    }
    for target in ["start_time_utc", "end_time_utc"] {
        let col = cols
            .entry(target.to_string())
            .or_insert_with(|| vec![Value::Null; n]);
        for cell in col.iter_mut() {
            *cell = match parse_timestamp(cell, tz_hint) {
                Some(t) => Value::Timestamp(t),
                None => Value::Null,
            };
        }
    }
    let starts: Vec<Option<DateTime<Utc>>> = cols["start_time_utc"]
        .iter()
        .map(Value::as_timestamp)
        .collect();
    let ends: Vec<Option<DateTime<Utc>>> = cols["end_time_utc"]
        .iter()
        .map(Value::as_timestamp)
        .collect();

    // Steps 5 and 6: keep a numeric supplied duration, otherwise derive
    // it from the resolved interval; coerce coordinates to floats.
    let supplied = cols.get("duration_minutes").cloned();
    let durations: Vec<Value> = (0..n)
        .map(|i| {
            let carried = supplied.as_ref().and_then(|col| col[i].as_num());
            let derived = match (starts[i], ends[i]) {
                (Some(start), Some(end)) => {
                    Some(((end - start).num_seconds() as f64 / 60.0).round())
                }
                _ => None,
            };
            match carried.or(derived) {
                Some(minutes) => Value::Num(minutes),
                None => Value::Null,
            }
        })
        .collect();
    cols.insert("duration_minutes".to_string(), durations);
    for field in ["latitude", "longitude"] {
        let col = cols
            .entry(field.to_string())
            .or_insert_with(|| vec![Value::Null; n]);
        for cell in col.iter_mut() {
            *cell = match cell.as_num() {
                Some(num) => Value::Num(num),
                None => Value::Null,
            };
        }
    }

    // Step 7: null out-of-range axes, remembering which rows were hit.
    let mut invalid_coord = vec![false; n];
    if let Some(col) = cols.get_mut("latitude") {
        null_out_of_range(col, 90.0, &mut invalid_coord);
    }
    if let Some(col) = cols.get_mut("longitude") {
        null_out_of_range(col, 180.0, &mut invalid_coord);
    }

    // Step 8: keep natural flight ids; synthesize a surrogate for the
    // rest. The surrogate column is always recomputed.
    for field in ["flight_id", "region_code", "region_name"] {
        cols.entry(field.to_string())
            .or_insert_with(|| vec![Value::Null; n]);
    }
    let regions: Vec<Option<String>> = (0..n)
        .map(|i| {
            non_empty_text(&cols["region_code"][i]).or_else(|| non_empty_text(&cols["region_name"][i]))
        })
        .collect();
    let mut flight_ids = cols["flight_id"].clone();
    let mut surrogates = vec![Value::Null; n];
    for i in 0..n {
        if non_empty_text(&flight_ids[i]).is_some() {
            continue;
        }
        if let Some(id) = surrogate_id(starts[i], ends[i], regions[i].as_deref()) {
            flight_ids[i] = Value::Str(id.clone());
            surrogates[i] = Value::Str(id);
        }
    }
    cols.insert("flight_id".to_string(), flight_ids);
    cols.insert("surrogate_id".to_string(), surrogates);

    // Step 9: drop invalid rows before deduplication.
    let keep: Vec<bool> = (0..n)
        .map(|i| {
            let times_ok = matches!((starts[i], ends[i]), (Some(start), Some(end)) if end >= start);
            times_ok && !invalid_coord[i]
        })
        .collect();
    let invalid = keep.iter().filter(|&&k| !k).count();
    for col in cols.values_mut() {
        retain_by_mask(col, &keep);
    }
    let rows = n - invalid;

    // Step 10: keep-last dedup over (flight_id, start truncated to
    // seconds, region_code); earlier occurrences stay in the table but
    // are marked superseded.
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for i in 0..rows {
        let key = format!(
            "{}|{}|{}",
            cols["flight_id"][i].as_text().unwrap_or_default(),
            cols["start_time_utc"][i]
                .as_timestamp()
                .map(|t| t.format(DEDUP_TIME_FORMAT).to_string())
                .unwrap_or_default(),
            cols["region_code"][i].as_text().unwrap_or_default()
        );
        groups.entry(key).or_default().push(i);
    }
    let mut superseded = vec![false; rows];
    let mut duplicates = 0;
    for indexes in groups.values() {
        for &i in &indexes[..indexes.len() - 1] {
            superseded[i] = true;
            duplicates += 1;
        }
    }
    cols.insert(
        "superseded".to_string(),
        superseded.into_iter().map(Value::Bool).collect(),
    );

    // Step 11: fill any still-missing canonical columns and fix the order.
    let mut ordered = IndexMap::new();
    for field in CANONICAL_ORDER {
        let values = cols
            .shift_remove(field)
            .unwrap_or_else(|| vec![Value::Null; rows]);
        ordered.insert(field.to_string(), values);
    }

    let counters = Counters {
        total: n,
        invalid,
        duplicates,
    };
    debug!(
        total = counters.total,
        invalid = counters.invalid,
        duplicates = counters.duplicates,
        rows,
        "normalized raw table"
    );
    (Frame::from_parts(ordered, rows), counters)
}

/// Empty canonical table: every canonical column present, zero rows.
fn empty_canonical() -> Frame {
    let columns: IndexMap<String, Vec<Value>> = CANONICAL_ORDER
        .iter()
        .map(|field| (field.to_string(), Vec::new()))
        .collect();
    Frame::from_parts(columns, 0)
}

/// Trimmed text of a cell, with empty strings treated as absent.
fn non_empty_text(cell: &Value) -> Option<String> {
    cell.as_text()
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Null every value outside `[-bound, bound]`, flagging its row.
fn null_out_of_range(col: &mut [Value], bound: f64, invalid: &mut [bool]) {
    for (i, cell) in col.iter_mut().enumerate() {
        if let Some(num) = cell.as_num() {
            if num < -bound || num > bound {
                *cell = Value::Null;
                invalid[i] = true;
            }
        }
    }
}

fn retain_by_mask(col: &mut Vec<Value>, mask: &[bool]) {
    let mut idx = 0;
    col.retain(|_| {
        let keep = mask.get(idx).copied().unwrap_or(false);
        idx += 1;
        keep
    });
}
