//! Validation result and report types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Impact level attached to a validation result.
///
/// By convention a result that passed carries `Info`; the stated severity is
/// the impact of the failure, so it only applies when `passed` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single validation check.
///
/// A failed check is a normal, expected outcome represented as data, never
/// an error. Missing keys, down sessions, and topology defects all land here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Short identifier for the check (e.g. `bgp_neighbor_established`).
    pub name: String,
    pub passed: bool,
    /// Human-readable description of the outcome.
    pub message: String,
    pub severity: Severity,
    /// Hostname of the device the check applies to; empty for fabric-wide
    /// checks.
    #[serde(default)]
    pub device: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl ValidationResult {
    /// A passing result; severity is downgraded to `Info`.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
            severity: Severity::Info,
            device: String::new(),
            expected: None,
            actual: None,
        }
    }

    /// A failing result with the given impact severity.
    pub fn fail(
        name: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            severity,
            device: String::new(),
            expected: None,
            actual: None,
        }
    }

    /// An informational result (skipped category, degraded collaborator).
    /// Counts as passed and never affects the overall verdict.
    pub fn info(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::pass(name, message)
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    /// Whether this result participates in the overall pass/fail verdict.
    pub fn is_informational(&self) -> bool {
        self.severity == Severity::Info && self.passed
    }
}

/// Derived counts for a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub informational: usize,
}

/// Aggregated, ordered collection of validation results.
///
/// The validator never short-circuits: every check runs and every result is
/// recorded, so one report communicates every defect found in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Hostname the report applies to; empty for fabric-wide reports.
    #[serde(default)]
    pub device: String,
    /// Individual outcomes in the order the checks ran.
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            results: Vec::new(),
        }
    }

    /// Append a result to the report.
    pub fn add(&mut self, result: ValidationResult) {
        self.results.push(result);
    }

    /// Append every result from another collection, preserving order.
    pub fn extend(&mut self, results: impl IntoIterator<Item = ValidationResult>) {
        self.results.extend(results);
    }

    /// Overall verdict: every non-informational result passed.
    pub fn passed(&self) -> bool {
        self.results
            .iter()
            .filter(|r| !r.is_informational())
            .all(|r| r.passed)
    }

    pub fn pass_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn fail_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Derived counts by outcome.
    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            total: self.results.len(),
            passed: self.pass_count(),
            failed: self.fail_count(),
            informational: self
                .results
                .iter()
                .filter(|r| r.is_informational())
                .count(),
        }
    }

    /// One-line human summary.
    pub fn summary_line(&self) -> String {
        let summary = self.summary();
        let scope = if self.device.is_empty() {
            "fabric".to_string()
        } else {
            self.device.clone()
        };
        format!(
            "[{scope}] {}/{} passed, {}/{} failed",
            summary.passed, summary.total, summary.failed, summary.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_pass_requires_all_non_informational() {
        let mut report = ValidationReport::new("leaf1");
        report.add(ValidationResult::pass("a", "fine"));
        report.add(ValidationResult::info("b", "category skipped"));
        assert!(report.passed());

        report.add(ValidationResult::fail("c", "peer down", Severity::Critical));
        assert!(!report.passed());
        assert_eq!(report.fail_count(), 1);
    }

    #[test]
    fn test_informational_results_do_not_fail_report() {
        let mut report = ValidationReport::new("leaf1");
        report.add(ValidationResult::info("skip", "evpn omitted by caller"));
        assert!(report.passed());
        assert_eq!(report.summary().informational, 1);
    }

    #[test]
    fn test_summary_counts() {
        let mut report = ValidationReport::new("leaf1");
        report.add(ValidationResult::pass("a", "ok"));
        report.add(ValidationResult::fail("b", "bad", Severity::High));
        let summary = report.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert!(report.summary_line().contains("1/2 passed"));
    }
}
