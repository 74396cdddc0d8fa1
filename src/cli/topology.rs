//! Topology command handler.

use super::{exit_codes, write_output};
use crate::error::Result;
use crate::model::Snapshot;
use crate::reports::{render_validation, ReportFormat};
use crate::snapshot::SnapshotStore;
use crate::topology::{self, AdjacencyGraph, ExpectedTopology};
use std::path::PathBuf;

/// Configuration for the `topology` subcommand.
#[derive(Debug, Clone)]
pub struct TopologyConfig {
    /// Snapshot files, one per device, captured at a comparable point in time.
    pub snapshots: Vec<PathBuf>,
    /// Optional expected-topology YAML file.
    pub expected: Option<PathBuf>,
    /// Also flag confirmed adjacencies missing from the expected topology.
    pub strict: bool,
    pub format: ReportFormat,
    pub output_file: Option<PathBuf>,
}

/// Run the topology command, returning the desired exit code.
pub fn run_topology(config: TopologyConfig) -> Result<i32> {
    let snapshots: Vec<Snapshot> = config
        .snapshots
        .iter()
        .map(|path| SnapshotStore::load(path))
        .collect::<Result<_>>()?;

    let graph = AdjacencyGraph::build(&snapshots)?;
    let expected = match &config.expected {
        Some(path) => Some(ExpectedTopology::from_path(path)?),
        None => None,
    };

    let report = topology::verify(&graph, expected.as_ref(), config.strict);
    let rendered = render_validation(&report, config.format)?;
    write_output(&rendered, config.output_file.as_ref())?;

    if report.passed() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::CHANGES_DETECTED)
    }
}
