//! Validation pipeline: run the check suite and assemble the report.

use tracing::info;

use crate::checks::{CheckRegistry, run_checks};
use crate::frame::Frame;
use crate::report::QualityReport;

/// Execute every registered check against `data` and aggregate the
/// results into a [`QualityReport`].
///
/// Pure over the frame: repeated runs on the same snapshot produce the
/// same verdict. The dataset version is carried through untouched.
pub fn validate(
    data: &Frame,
    registry: &CheckRegistry,
    dataset_version: Option<&str>,
) -> QualityReport {
    let results = run_checks(data, registry);
    let report = QualityReport::new(dataset_version.map(str::to_string), results);
    info!(
        dataset_version = dataset_version.unwrap_or("-"),
        status = report.status.label(),
        warn_count = report.warn_count,
        fail_count = report.fail_count,
        "validation complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{Check, CheckResult, CheckStatus};

    struct FixedCheck(CheckStatus);

    impl Check for FixedCheck {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn run(&self, _data: &Frame) -> CheckResult {
            CheckResult::new(self.name(), self.0, "fixed outcome")
        }
    }

    #[test]
    fn test_custom_registry_is_honored() {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(FixedCheck(CheckStatus::Warn)));
        registry.register(Box::new(FixedCheck(CheckStatus::Ok)));

        let report = validate(&Frame::new(), &registry, Some("v7"));
        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.status, CheckStatus::Warn);
        assert_eq!(report.dataset_version.as_deref(), Some("v7"));
    }

    #[test]
    fn test_every_check_runs_despite_early_fail() {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(FixedCheck(CheckStatus::Fail)));
        registry.register(Box::new(FixedCheck(CheckStatus::Warn)));
        registry.register(Box::new(FixedCheck(CheckStatus::Ok)));

        let report = validate(&Frame::new(), &registry, None);
        assert_eq!(report.checks.len(), 3);
        assert_eq!(report.status, CheckStatus::Fail);
    }
}
