//! Assertion library, state validator, and report types.
//!
//! Check failures are data (a [`ValidationResult`] with `passed: false`),
//! never errors; errors are reserved for infrastructure faults like
//! unreadable snapshot files.

pub mod assertions;
mod report;
mod validator;

pub use report::{ReportSummary, Severity, ValidationReport, ValidationResult};
pub use validator::{StateValidator, ValidationInput};
