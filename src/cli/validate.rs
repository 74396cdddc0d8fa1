//! Validate command handler.

use super::{exit_codes, write_output};
use crate::error::Result;
use crate::reports::{render_validation, ReportFormat};
use crate::snapshot::SnapshotStore;
use crate::validate::StateValidator;
use std::path::PathBuf;

/// Configuration for the `validate` subcommand.
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    /// Snapshot files to validate, one report per device.
    pub snapshots: Vec<PathBuf>,
    /// Combined interface error count a device may carry before the error
    /// check fails.
    pub error_threshold: u64,
    pub format: ReportFormat,
    pub output_file: Option<PathBuf>,
}

/// Run the validate command, returning the desired exit code.
pub fn run_validate(config: ValidateConfig) -> Result<i32> {
    let mut rendered = String::new();
    let mut all_passed = true;

    for path in &config.snapshots {
        let snapshot = SnapshotStore::load(path)?;
        let validator = StateValidator::new(snapshot.device.hostname.clone())
            .with_error_threshold(config.error_threshold);
        let report = validator.validate_snapshot(&snapshot);
        all_passed &= report.passed();
        rendered.push_str(&render_validation(&report, config.format)?);
        rendered.push('\n');
    }

    write_output(&rendered, config.output_file.as_ref())?;

    if all_passed {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::CHANGES_DETECTED)
    }
}
