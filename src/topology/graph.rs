//! Directed adjacency graph assembled from per-device LLDP views.

use crate::error::{FabricError, Result};
use crate::model::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One directed adjacency, derived from a single device's own LLDP view.
///
/// The remote side is *as reported*; it has not been confirmed by the remote
/// device until the verifier finds the reverse edge.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AdjacencyEdge {
    pub local_device: String,
    pub local_interface: String,
    pub remote_device: String,
    pub remote_interface: String,
}

impl AdjacencyEdge {
    /// The exact reverse of this edge: the record the remote device would
    /// report if the link is healthy and both LLDP views agree.
    pub fn reversed(&self) -> AdjacencyEdge {
        AdjacencyEdge {
            local_device: self.remote_device.clone(),
            local_interface: self.remote_interface.clone(),
            remote_device: self.local_device.clone(),
            remote_interface: self.local_interface.clone(),
        }
    }

    /// Undirected device pair, normalized so (a, b) == (b, a).
    pub fn device_pair(&self) -> (String, String) {
        if self.local_device <= self.remote_device {
            (self.local_device.clone(), self.remote_device.clone())
        } else {
            (self.remote_device.clone(), self.local_device.clone())
        }
    }
}

/// Set of devices plus the directed edges collected from all devices'
/// snapshots at a comparable point in time. Built fresh per verification run
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyGraph {
    devices: BTreeSet<String>,
    edges: BTreeSet<AdjacencyEdge>,
}

impl AdjacencyGraph {
    /// Build the graph from the `lldp_neighbors` category of the given
    /// snapshots.
    ///
    /// An empty snapshot set is a configuration error. Devices referenced
    /// only as a remote peer still become nodes, so asymmetry detection can
    /// name them. LLDP records with an empty remote system are ignored, and
    /// a snapshot whose LLDP collection failed contributes no edges (its
    /// device is still a node).
    pub fn build(snapshots: &[Snapshot]) -> Result<Self> {
        if snapshots.is_empty() {
            return Err(FabricError::configuration(
                "cannot build topology graph from an empty snapshot set",
            ));
        }

        let mut devices = BTreeSet::new();
        let mut edges = BTreeSet::new();

        for snapshot in snapshots {
            let local = snapshot.device.hostname.clone();
            devices.insert(local.clone());

            if let Some(error) = &snapshot.lldp_neighbors.error {
                tracing::warn!(
                    device = %local,
                    error,
                    "LLDP collection failed; device contributes no edges"
                );
                continue;
            }

            for neighbor in snapshot.lldp_neighbors.records.values() {
                if neighbor.remote_system.is_empty() {
                    continue;
                }
                devices.insert(neighbor.remote_system.clone());
                edges.insert(AdjacencyEdge {
                    local_device: local.clone(),
                    local_interface: neighbor.local_interface.clone(),
                    remote_device: neighbor.remote_system.clone(),
                    remote_interface: neighbor.remote_port.clone(),
                });
            }
        }

        tracing::info!(
            devices = devices.len(),
            edges = edges.len(),
            "topology graph built"
        );
        Ok(Self { devices, edges })
    }

    pub fn devices(&self) -> &BTreeSet<String> {
        &self.devices
    }

    pub fn edges(&self) -> impl Iterator<Item = &AdjacencyEdge> {
        self.edges.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_edge(&self, edge: &AdjacencyEdge) -> bool {
        self.edges.contains(edge)
    }

    /// Undirected device pairs confirmed from both sides with matching
    /// interface names. Only these count as "observed" for connectivity
    /// verification, so a single stale LLDP entry cannot fake a link.
    pub fn confirmed_pairs(&self) -> BTreeSet<(String, String)> {
        self.edges
            .iter()
            .filter(|edge| self.edges.contains(&edge.reversed()))
            .map(AdjacencyEdge::device_pair)
            .collect()
    }

    /// Undirected neighbor view over all edges, confirmed or not; used by the
    /// connectivity check.
    pub(crate) fn undirected_neighbors(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        let mut neighbors: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for edge in &self.edges {
            neighbors
                .entry(edge.local_device.as_str())
                .or_default()
                .insert(edge.remote_device.as_str());
            neighbors
                .entry(edge.remote_device.as_str())
                .or_default()
                .insert(edge.local_device.as_str());
        }
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceIdentity, LldpNeighbor};

    fn snapshot_with_lldp(host: &str, neighbors: &[(&str, &str, &str)]) -> Snapshot {
        let mut snap = Snapshot::new(DeviceIdentity::new(host, "arista", "eos"), "capture");
        for (local_if, remote_sys, remote_port) in neighbors {
            snap.lldp_neighbors.records.insert(
                (*local_if).to_string(),
                LldpNeighbor {
                    local_interface: (*local_if).to_string(),
                    remote_system: (*remote_sys).to_string(),
                    remote_port: (*remote_port).to_string(),
                },
            );
        }
        snap
    }

    #[test]
    fn test_build_empty_set_rejected() {
        let err = AdjacencyGraph::build(&[]).unwrap_err();
        assert!(matches!(err, FabricError::Configuration(_)));
    }

    #[test]
    fn test_remote_only_devices_become_nodes() {
        let snapshots = vec![snapshot_with_lldp(
            "leaf1",
            &[("et-0/0/0", "spine1", "et-0/0/1")],
        )];
        let graph = AdjacencyGraph::build(&snapshots).expect("non-empty");
        assert!(graph.devices().contains("leaf1"));
        assert!(graph.devices().contains("spine1"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_confirmed_pairs_require_both_directions() {
        let one_sided = vec![
            snapshot_with_lldp("leaf1", &[("et-0/0/0", "spine1", "et-0/0/1")]),
            snapshot_with_lldp("spine1", &[]),
        ];
        let graph = AdjacencyGraph::build(&one_sided).expect("non-empty");
        assert!(graph.confirmed_pairs().is_empty());

        let both = vec![
            snapshot_with_lldp("leaf1", &[("et-0/0/0", "spine1", "et-0/0/1")]),
            snapshot_with_lldp("spine1", &[("et-0/0/1", "leaf1", "et-0/0/0")]),
        ];
        let graph = AdjacencyGraph::build(&both).expect("non-empty");
        let pairs = graph.confirmed_pairs();
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&("leaf1".to_string(), "spine1".to_string())));
    }

    #[test]
    fn test_failed_lldp_contributes_no_edges() {
        let mut snap = snapshot_with_lldp("leaf1", &[]);
        snap.lldp_neighbors = crate::model::CategoryData::failed("timeout");
        let graph = AdjacencyGraph::build(&[snap]).expect("non-empty");
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.devices().contains("leaf1"));
    }
}
