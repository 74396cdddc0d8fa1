//! Report rendering for diff results and validation reports.
//!
//! Three formats: JSON for programmatic integration, Markdown for change
//! records, and a compact summary for terminal usage. Rendering never alters
//! the data; the JSON form is the serialized structure itself.

mod markdown;
mod summary;

use crate::diff::SnapshotDiff;
use crate::error::Result;
use crate::validate::ValidationReport;
use std::fmt;
use std::str::FromStr;

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    Json,
    Markdown,
    #[default]
    Summary,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Summary => "summary",
        };
        f.write_str(name)
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "summary" => Ok(Self::Summary),
            other => Err(format!("unknown report format: {other}")),
        }
    }
}

/// Render a snapshot diff in the requested format.
pub fn render_diff(diff: &SnapshotDiff, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(diff)?),
        ReportFormat::Markdown => Ok(markdown::diff_report(diff)),
        ReportFormat::Summary => Ok(summary::diff_summary(diff)),
    }
}

/// Render a validation report in the requested format.
pub fn render_validation(report: &ValidationReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Markdown => Ok(markdown::validation_report(report)),
        ReportFormat::Summary => Ok(summary::validation_summary(report)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parses_aliases() {
        assert_eq!("md".parse::<ReportFormat>().unwrap(), ReportFormat::Markdown);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("xml".parse::<ReportFormat>().is_err());
    }
}
