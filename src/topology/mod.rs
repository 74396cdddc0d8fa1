//! Topology graph construction and verification.
//!
//! The builder assembles a directed adjacency graph from many devices'
//! `lldp_neighbors` data; the verifier checks it for one-sided links and
//! compares bidirectionally-confirmed adjacencies against a caller-supplied
//! expected topology.

mod expected;
mod graph;
mod verifier;

pub use expected::{ExpectedTopology, MeshRule};
pub use graph::{AdjacencyEdge, AdjacencyGraph};
pub use verifier::{check_connected, detect_asymmetric_links, verify, verify_expected};
