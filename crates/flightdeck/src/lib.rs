//! Flightdeck: canonicalization and quality validation for heterogeneous
//! flight-activity reports.
//!
//! Raw reports arrive in many shapes: aliased and multilingual column
//! names, free-form timestamps in local time, durations that may or may
//! not be filled in. Flightdeck reduces them to one canonical record
//! schema and runs an extensible suite of data-quality rules against the
//! result.
//!
//! # Core Principles
//!
//! - **Total normalization**: bad rows degrade to null or invalid, they
//!   never abort the run
//! - **Audit-friendly**: duplicates are marked superseded and retained,
//!   never silently dropped
//! - **Explicit rules**: checks are registered in a fixed-order list, not
//!   discovered, and every check always runs
//!
//! # Example
//!
//! ```
//! use flightdeck::{CheckRegistry, Frame, Value, normalize, validate};
//!
//! let raw = Frame::from_columns(vec![
//!     ("FlightNo".to_string(), vec![Value::Str("F-100".into())]),
//!     ("Departure Time".to_string(), vec![Value::Str("2024-05-01 10:00:00".into())]),
//!     ("Arrival Time".to_string(), vec![Value::Str("2024-05-01 11:00:00".into())]),
//! ]).unwrap();
//!
//! let (canonical, counters) = normalize(&raw, Some("Europe/Moscow"));
//! assert_eq!(counters.total, 1);
//!
//! let registry = CheckRegistry::default_suite();
//! let report = validate(&canonical, &registry, Some("v1"));
//! println!("{}", report.dataset_status());
//! ```

pub mod checks;
pub mod error;
pub mod frame;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod schema;

pub use checks::{Check, CheckRegistry, CheckResult, CheckStatus, aggregate_status, run_checks};
pub use error::{FlightdeckError, Result};
pub use frame::{Frame, Value};
pub use normalize::{Counters, normalize};
pub use pipeline::validate;
pub use report::{QualityReport, RecordIssue, ReportEntry, record_issues, report_entries};
pub use schema::{CANONICAL_ORDER, HeaderResolver};
