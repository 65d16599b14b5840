//! Pluggable data-quality checks over the canonical table.
//!
//! Each check is an independent, side-effect-free rule producing a
//! [`CheckResult`]; a [`CheckRegistry`] holds the ordered list of active
//! checks. Check-level defects (a required column missing entirely) become
//! WARN/FAIL results, never errors, so every check always runs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::frame::Frame;

pub mod coordinate_range;
pub mod duration_outliers;
pub mod duration_range;
pub mod monthly_completeness;
pub mod sample;
pub mod schema;
pub mod uniqueness;

pub use coordinate_range::CoordinateRangeCheck;
pub use duration_outliers::DurationOutlierCheck;
pub use duration_range::DurationRangeCheck;
pub use monthly_completeness::MonthlyCompletenessCheck;
pub use schema::SchemaCheck;
pub use uniqueness::UniquenessCheck;

/// Standardized status levels, ordered OK < WARN < FAIL.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Ok,
    Warn,
    Fail,
}

impl CheckStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Ok => "OK",
            CheckStatus::Warn => "WARN",
            CheckStatus::Fail => "FAIL",
        }
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub summary: String,
    /// Structured payload: thresholds, counts, bounded row samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CheckResult {
    pub fn new(
        name: impl Into<String>,
        status: CheckStatus,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            summary: summary.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// A single data-quality rule.
///
/// Checks are pure functions of the table; they hold no mutable state and
/// may run in any order.
pub trait Check {
    /// Stable name used in reports and persistence.
    fn name(&self) -> &'static str;

    /// Evaluate the rule against `data`.
    fn run(&self, data: &Frame) -> CheckResult;
}

/// Explicit, ordered collection of active checks.
///
/// Constructed once per run and passed by reference; call sites may
/// substitute a custom list, e.g. to exercise a single rule in tests.
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default suite in its reference order.
    pub fn default_suite() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SchemaCheck::new()));
        registry.register(Box::new(DurationRangeCheck::new()));
        registry.register(Box::new(CoordinateRangeCheck::new()));
        registry.register(Box::new(UniquenessCheck::new()));
        registry.register(Box::new(MonthlyCompletenessCheck::new()));
        registry.register(Box::new(DurationOutlierCheck::new()));
        registry
    }

    pub fn register(&mut self, check: Box<dyn Check>) {
        self.checks.push(check);
    }

    pub fn checks(&self) -> &[Box<dyn Check>] {
        &self.checks
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Run every registered check in registration order. No check is skipped,
/// so the full result set is always available for the report.
pub fn run_checks(data: &Frame, registry: &CheckRegistry) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(registry.len());
    for check in registry.checks() {
        debug!(check = check.name(), "running check");
        let result = check.run(data);
        debug!(check = check.name(), status = result.status.label(), "check result");
        results.push(result);
    }
    results
}

/// Fold individual results into an overall status: FAIL if any check
/// failed, else WARN if any warned, else OK.
pub fn aggregate_status(results: &[CheckResult]) -> CheckStatus {
    let mut overall = CheckStatus::Ok;
    for result in results {
        match result.status {
            CheckStatus::Fail => return CheckStatus::Fail,
            CheckStatus::Warn => overall = CheckStatus::Warn,
            CheckStatus::Ok => {}
        }
    }
    overall
}
