//! Markdown report generation for change records and review threads.

use crate::diff::{DiffAction, SnapshotDiff};
use crate::model::Category;
use crate::validate::{Severity, ValidationReport};
use serde_json::Value;
use std::fmt::Write;

/// Render a snapshot diff as a Markdown document, one section per category
/// that changed.
pub fn diff_report(diff: &SnapshotDiff) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# State diff: {} ({} -> {})\n",
        diff.device.hostname, diff.pre_label, diff.post_label
    );

    if !diff.has_changes() {
        out.push_str("No changes detected.\n");
    }

    for category in Category::ALL {
        let entries: Vec<_> = diff
            .entries
            .iter()
            .filter(|e| e.category == category)
            .collect();
        if entries.is_empty() {
            continue;
        }

        let _ = writeln!(out, "## {category}\n");
        for entry in entries {
            match entry.action {
                DiffAction::Added => {
                    let _ = writeln!(out, "- **added** `{}`: {}", entry.key, render_value(&entry.after));
                }
                DiffAction::Removed => {
                    let _ = writeln!(out, "- **removed** `{}`: {}", entry.key, render_value(&entry.before));
                }
                DiffAction::Changed => {
                    let _ = writeln!(
                        out,
                        "- **changed** `{}`: {} -> {}",
                        entry.key,
                        render_value(&entry.before),
                        render_value(&entry.after)
                    );
                }
            }
        }
        out.push('\n');
    }

    if !diff.skipped_categories.is_empty() {
        out.push_str("## Skipped categories\n\n");
        for category in &diff.skipped_categories {
            let _ = writeln!(out, "- `{category}` (collection failed on one side)");
        }
    }

    out
}

/// Render a validation report as Markdown, failures grouped by severity.
pub fn validation_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    let scope = if report.device.is_empty() {
        "fabric"
    } else {
        report.device.as_str()
    };
    let verdict = if report.passed() { "PASS" } else { "FAIL" };
    let summary = report.summary();
    let _ = writeln!(out, "# Validation report: {scope}: {verdict}\n");
    let _ = writeln!(
        out,
        "{} checks, {} passed, {} failed\n",
        summary.total, summary.passed, summary.failed
    );

    for severity in [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ] {
        let failures: Vec<_> = report
            .results
            .iter()
            .filter(|r| !r.passed && r.severity == severity)
            .collect();
        if failures.is_empty() {
            continue;
        }
        let _ = writeln!(out, "## {severity}\n");
        for result in failures {
            let _ = writeln!(out, "- `{}`: {}", result.name, result.message);
            if let (Some(expected), Some(actual)) = (&result.expected, &result.actual) {
                let _ = writeln!(out, "  - expected: `{expected}`, actual: `{actual}`");
            }
        }
        out.push('\n');
    }

    let passed: Vec<_> = report.results.iter().filter(|r| r.passed).collect();
    if !passed.is_empty() {
        out.push_str("## Passed\n\n");
        for result in passed {
            let _ = writeln!(out, "- `{}`: {}", result.name, result.message);
        }
    }

    out
}

fn render_value(value: &Option<Value>) -> String {
    match value {
        Some(v) => format!("`{}`", serde_json::to_string(v).unwrap_or_default()),
        None => "`null`".to_string(),
    }
}
