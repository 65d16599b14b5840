//! Canonical schema conformance check.

use serde_json::{Map, json};

use crate::frame::Frame;
use crate::schema::{CANONICAL_ORDER, REQUIRED_FIELDS};

use super::{Check, CheckResult, CheckStatus};

/// Verifies the table adheres to the canonical schema: all canonical
/// columns present (FAIL when missing), no stray columns (WARN), and no
/// nulls in the required fields (FAIL with per-field counts).
#[derive(Debug, Default)]
pub struct SchemaCheck;

impl SchemaCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Check for SchemaCheck {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn run(&self, data: &Frame) -> CheckResult {
        let mut status = CheckStatus::Ok;
        let mut messages = Vec::new();
        let mut details = Map::new();

        let mut missing: Vec<&str> = CANONICAL_ORDER
            .iter()
            .copied()
            .filter(|field| !data.has_column(field))
            .collect();
        missing.sort_unstable();
        if !missing.is_empty() {
            status = CheckStatus::Fail;
            details.insert("missing_columns".to_string(), json!(missing));
            messages.push("missing required columns");
        }

        let mut unexpected: Vec<&str> = data
            .column_names()
            .into_iter()
            .filter(|name| !CANONICAL_ORDER.contains(name))
            .collect();
        unexpected.sort_unstable();
        if !unexpected.is_empty() {
            if status == CheckStatus::Ok {
                status = CheckStatus::Warn;
            }
            details.insert("unexpected_columns".to_string(), json!(unexpected));
            messages.push("found unexpected columns");
        }

        let mut null_counts = Map::new();
        for field in REQUIRED_FIELDS {
            if let Some(col) = data.column(field) {
                let nulls = col.iter().filter(|cell| cell.is_null()).count();
                if nulls > 0 {
                    null_counts.insert(field.to_string(), json!(nulls));
                }
            }
        }
        if !null_counts.is_empty() {
            status = CheckStatus::Fail;
            details.insert("null_counts".to_string(), json!(null_counts));
            messages.push("null values detected in required columns");
        }

        if messages.is_empty() {
            messages.push("schema matches canonical definition");
        }

        let mut result = CheckResult::new(self.name(), status, messages.join("; "));
        if !details.is_empty() {
            result = result.with_details(serde_json::Value::Object(details));
        }
        result
    }
}
