//! Structural checks over a built adjacency graph.
//!
//! Each check is independent and reports its findings as validation results,
//! so verifier output composes with the state validator's reports. Topology
//! defects are data to surface, never errors.

use super::{AdjacencyGraph, ExpectedTopology};
use crate::validate::{Severity, ValidationReport, ValidationResult};
use std::collections::{BTreeSet, VecDeque};

const CHECK_ASYMMETRIC: &str = "asymmetric_link";
const CHECK_EXPECTED: &str = "expected_adjacency";
const CHECK_UNEXPECTED: &str = "unexpected_adjacency";
const CHECK_CONNECTED: &str = "topology_connected";

/// Scan for links visible from only one side.
///
/// For every edge (A, ifA) → (B, ifB) the exact reverse (B, ifB) → (A, ifA)
/// must exist. Each missing direction is its own defect: two half-dead
/// links between the same pair produce two results.
pub fn detect_asymmetric_links(graph: &AdjacencyGraph) -> Vec<ValidationResult> {
    let mut results = Vec::new();
    for edge in graph.edges() {
        if !graph.contains_edge(&edge.reversed()) {
            results.push(
                ValidationResult::fail(
                    CHECK_ASYMMETRIC,
                    format!(
                        "{} {} sees {} {}, but {} {} does not report the reverse",
                        edge.local_device,
                        edge.local_interface,
                        edge.remote_device,
                        edge.remote_interface,
                        edge.remote_device,
                        edge.remote_interface,
                    ),
                    Severity::High,
                )
                .with_device(edge.local_device.clone()),
            );
        }
    }
    if results.is_empty() {
        results.push(ValidationResult::pass(
            CHECK_ASYMMETRIC,
            format!(
                "all {} adjacencies are bidirectionally confirmed",
                graph.edge_count()
            ),
        ));
    }
    results
}

/// Compare bidirectionally-confirmed adjacencies against the expected
/// topology.
///
/// One failed result per missing required pair; in strict mode also one per
/// confirmed pair the expectation does not list.
pub fn verify_expected(
    graph: &AdjacencyGraph,
    expected: &ExpectedTopology,
    strict: bool,
) -> Vec<ValidationResult> {
    let required = expected.required_pairs();
    let observed = graph.confirmed_pairs();
    let mut results = Vec::new();

    for (a, b) in required.difference(&observed) {
        results.push(
            ValidationResult::fail(
                CHECK_EXPECTED,
                format!("required adjacency {a} <-> {b} not confirmed in LLDP data"),
                Severity::Critical,
            )
            .with_expected(format!("{a} <-> {b}"))
            .with_actual("not observed"),
        );
    }

    if strict {
        for (a, b) in observed.difference(&required) {
            results.push(
                ValidationResult::fail(
                    CHECK_UNEXPECTED,
                    format!("adjacency {a} <-> {b} observed but not in the expected topology"),
                    Severity::Medium,
                )
                .with_actual(format!("{a} <-> {b}")),
            );
        }
    }

    if results.is_empty() {
        results.push(ValidationResult::pass(
            CHECK_EXPECTED,
            format!("all {} required adjacencies confirmed", required.len()),
        ));
    }
    results
}

/// Verify the graph forms a single connected component.
///
/// BFS over the undirected view of all edges; failure names the devices
/// unreachable from the (alphabetically) first node.
pub fn check_connected(graph: &AdjacencyGraph) -> ValidationResult {
    let Some(start) = graph.devices().iter().next() else {
        return ValidationResult::info(CHECK_CONNECTED, "graph has no devices");
    };

    let neighbors = graph.undirected_neighbors();
    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(start.as_str());

    while let Some(node) = queue.pop_front() {
        if !visited.insert(node) {
            continue;
        }
        if let Some(peers) = neighbors.get(node) {
            for peer in peers {
                if !visited.contains(peer) {
                    queue.push_back(peer);
                }
            }
        }
    }

    let unreachable: Vec<&str> = graph
        .devices()
        .iter()
        .map(String::as_str)
        .filter(|device| !visited.contains(device))
        .collect();

    if unreachable.is_empty() {
        ValidationResult::pass(
            CHECK_CONNECTED,
            format!("topology is fully connected ({} devices)", visited.len()),
        )
    } else {
        ValidationResult::fail(
            CHECK_CONNECTED,
            format!(
                "topology graph is disconnected; unreachable devices: {}",
                unreachable.join(", ")
            ),
            Severity::Critical,
        )
    }
}

/// Run every verifier check over one built graph and aggregate into a single
/// fabric-wide report.
///
/// The asymmetry and connectivity-expectation checks are deliberately
/// separate results: there is no combined pass/fail policy beyond the
/// report's own verdict.
pub fn verify(
    graph: &AdjacencyGraph,
    expected: Option<&ExpectedTopology>,
    strict: bool,
) -> ValidationReport {
    let mut report = ValidationReport::new("");
    report.extend(detect_asymmetric_links(graph));
    match expected {
        Some(expected) => report.extend(verify_expected(graph, expected, strict)),
        None => report.add(ValidationResult::info(
            CHECK_EXPECTED,
            "no expected topology supplied; adjacency verification skipped",
        )),
    }
    report.add(check_connected(graph));
    tracing::info!(summary = %report.summary_line(), "topology verification complete");
    report
}
