//! Compact shell-friendly summaries.

use crate::diff::SnapshotDiff;
use crate::model::Category;
use crate::validate::ValidationReport;
use std::fmt::Write;

/// One-screen summary of a snapshot diff: per-category change counts.
pub fn diff_summary(diff: &SnapshotDiff) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} -> {}",
        diff.device.hostname, diff.pre_label, diff.post_label
    );

    if !diff.has_changes() && diff.skipped_categories.is_empty() {
        out.push_str("  no changes\n");
        return out;
    }

    for category in Category::ALL {
        let added = diff.added().filter(|e| e.category == category).count();
        let removed = diff.removed().filter(|e| e.category == category).count();
        let changed = diff.changed().filter(|e| e.category == category).count();
        if added + removed + changed == 0 {
            continue;
        }
        let _ = writeln!(
            out,
            "  {category}: +{added} -{removed} ~{changed}"
        );
    }

    for category in &diff.skipped_categories {
        let _ = writeln!(out, "  {category}: skipped (collection failed)");
    }

    out
}

/// One-screen summary of a validation report: verdict plus every failure.
pub fn validation_summary(report: &ValidationReport) -> String {
    let mut out = String::new();
    let verdict = if report.passed() { "PASS" } else { "FAIL" };
    let _ = writeln!(out, "{verdict} {}", report.summary_line());

    for result in report.results.iter().filter(|r| !r.passed) {
        let _ = writeln!(
            out,
            "  [{}] {}: {}",
            result.severity, result.name, result.message
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{Severity, ValidationResult};

    #[test]
    fn test_validation_summary_lists_failures_only() {
        let mut report = ValidationReport::new("leaf1");
        report.add(ValidationResult::pass("a", "ok"));
        report.add(ValidationResult::fail("b", "peer down", Severity::Critical));

        let text = validation_summary(&report);
        assert!(text.starts_with("FAIL"));
        assert!(text.contains("peer down"));
        assert!(!text.contains("ok\n"));
    }
}
