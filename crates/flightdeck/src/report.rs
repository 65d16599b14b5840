//! Quality report assembly.
//!
//! Converts check results into the structures external sinks consume: the
//! aggregate report, flat per-check entries annotated with the regions and
//! records they touch, and per-record issues for flight-level auditing.
//! The dataset version is an opaque token passed through unmodified.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, json};

use crate::checks::{CheckResult, CheckStatus, aggregate_status};
use crate::error::{FlightdeckError, Result};

/// Serializable report describing one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub dataset_version: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub status: CheckStatus,
    pub warn_count: usize,
    pub fail_count: usize,
    pub checks: Vec<CheckResult>,
}

impl QualityReport {
    /// Aggregate the given results into a report.
    pub fn new(dataset_version: Option<String>, checks: Vec<CheckResult>) -> Self {
        let status = aggregate_status(&checks);
        let warn_count = checks.iter().filter(|c| c.status == CheckStatus::Warn).count();
        let fail_count = checks.iter().filter(|c| c.status == CheckStatus::Fail).count();
        Self {
            dataset_version,
            generated_at: Utc::now(),
            status,
            warn_count,
            fail_count,
            checks,
        }
    }

    /// External status string used by reporting conventions downstream.
    pub fn dataset_status(&self) -> &'static str {
        dataset_status(self.status)
    }

    /// Write the report as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload).map_err(|source| FlightdeckError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Map an aggregate status onto the external dataset status string.
pub fn dataset_status(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Ok => "validated",
        CheckStatus::Warn => "quality_warn",
        CheckStatus::Fail => "quality_fail",
    }
}

/// Flat, persistable payload for a single check outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub check_name: String,
    pub severity: CheckStatus,
    pub payload: serde_json::Value,
}

/// A concrete quality issue affecting one identifiable record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordIssue {
    pub flight_uid: String,
    pub check_name: String,
    pub severity: CheckStatus,
    pub details: serde_json::Value,
}

/// Flatten check results into report entries.
///
/// Each payload carries the check's summary plus its details; when the
/// details embed sampled rows, the regions and record ids they mention are
/// lifted into `impacted_regions` / `impacted_records` (deduplicated,
/// sorted) so consumers need not dig through samples.
pub fn report_entries(results: &[CheckResult]) -> Vec<ReportEntry> {
    results
        .iter()
        .map(|result| {
            let mut payload = match &result.details {
                Some(serde_json::Value::Object(object)) => object.clone(),
                Some(other) => {
                    let mut object = Map::new();
                    object.insert("details".to_string(), other.clone());
                    object
                }
                None => Map::new(),
            };
            payload.insert("summary".to_string(), json!(result.summary));

            if let Some(samples) = result.details.as_ref().and_then(sample_rows_of) {
                let regions = collect_field(samples, "region_code");
                let records = collect_field(samples, "flight_id");
                if !regions.is_empty() {
                    payload.insert("impacted_regions".to_string(), json!(regions));
                }
                if !records.is_empty() {
                    payload.insert("impacted_records".to_string(), json!(records));
                }
            }

            ReportEntry {
                check_name: result.name.clone(),
                severity: result.status,
                payload: serde_json::Value::Object(payload),
            }
        })
        .collect()
}

/// One issue per (sampled record, warning-or-failing check) pair.
pub fn record_issues(results: &[CheckResult]) -> Vec<RecordIssue> {
    let mut issues = Vec::new();
    for result in results {
        if result.status == CheckStatus::Ok {
            continue;
        }
        let Some(samples) = result.details.as_ref().and_then(sample_rows_of) else {
            continue;
        };
        let mut seen = BTreeSet::new();
        for row in samples {
            let Some(flight_uid) = row.get("flight_id").and_then(|v| v.as_str()) else {
                continue;
            };
            if !seen.insert(flight_uid.to_string()) {
                continue;
            }
            issues.push(RecordIssue {
                flight_uid: flight_uid.to_string(),
                check_name: result.name.clone(),
                severity: result.status,
                details: row.clone(),
            });
        }
    }
    issues
}

fn sample_rows_of(details: &serde_json::Value) -> Option<&Vec<serde_json::Value>> {
    details.get("sample_rows").and_then(|v| v.as_array())
}

fn collect_field(samples: &[serde_json::Value], field: &str) -> Vec<String> {
    let unique: BTreeSet<String> = samples
        .iter()
        .filter_map(|row| row.get(field))
        .filter_map(|value| value.as_str())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    unique.into_iter().collect()
}
