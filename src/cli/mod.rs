//! CLI command handlers.
//!
//! Each handler implements one subcommand and returns the exit code the
//! binary should terminate with; main.rs owns argument parsing and process
//! exit.

mod diff;
mod topology;
mod validate;

pub use diff::{run_diff, DiffConfig};
pub use topology::{run_topology, TopologyConfig};
pub use validate::{run_validate, ValidateConfig};

use crate::error::{FabricError, Result};
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Exit codes for CI/CD integration.
pub mod exit_codes {
    /// No changes detected / all checks passed.
    pub const SUCCESS: i32 = 0;
    /// Changes detected or validation failures found.
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred.
    pub const ERROR: i32 = 3;
}

/// Write rendered output to the given file, or stdout when none is set.
fn write_output(rendered: &str, file: Option<&PathBuf>) -> Result<()> {
    match file {
        Some(path) => std::fs::write(path, rendered)
            .map_err(|err| FabricError::io(path.clone(), err)),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(rendered.as_bytes())
                .map_err(|err| FabricError::io(Path::new("stdout").to_path_buf(), err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
