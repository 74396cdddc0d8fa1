//! Diff command handler.

use super::{exit_codes, write_output};
use crate::diff;
use crate::error::Result;
use crate::reports::{render_diff, ReportFormat};
use crate::snapshot::SnapshotStore;
use std::path::PathBuf;

/// Configuration for the `diff` subcommand.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Path to the pre-change snapshot file.
    pub pre: PathBuf,
    /// Path to the post-change snapshot file.
    pub post: PathBuf,
    pub format: ReportFormat,
    pub output_file: Option<PathBuf>,
    /// Exit cleanly even when changes were detected.
    pub no_fail_on_change: bool,
}

/// Run the diff command, returning the desired exit code.
pub fn run_diff(config: DiffConfig) -> Result<i32> {
    let pre = SnapshotStore::load(&config.pre)?;
    let post = SnapshotStore::load(&config.post)?;

    let result = diff::diff(&pre, &post)?;
    let rendered = render_diff(&result, config.format)?;
    write_output(&rendered, config.output_file.as_ref())?;

    if result.has_changes() && !config.no_fail_on_change {
        Ok(exit_codes::CHANGES_DETECTED)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}
