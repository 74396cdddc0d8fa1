//! Caller-supplied description of required adjacencies.

use crate::error::{FabricError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A full-mesh requirement between two device groups, e.g. every leaf must
/// connect to every spine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshRule {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// Device-agnostic description of required adjacencies.
///
/// Used only for comparison; the verifier never alters it. Loadable from a
/// YAML file:
///
/// ```yaml
/// pairs:
///   - [leaf1, spine1]
/// full_mesh:
///   - left: [leaf1, leaf2, leaf3, leaf4]
///     right: [spine1, spine2]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedTopology {
    /// Explicit required device pairs.
    #[serde(default)]
    pub pairs: Vec<(String, String)>,
    /// Group-to-group full-mesh requirements.
    #[serde(default)]
    pub full_mesh: Vec<MeshRule>,
}

impl ExpectedTopology {
    /// Load an expected topology from a YAML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| FabricError::io(path.to_path_buf(), err))?;
        Self::from_yaml(&content).map_err(|err| {
            FabricError::configuration(format!(
                "invalid expected-topology file {}: {err}",
                path.display()
            ))
        })
    }

    /// Parse an expected topology from YAML text.
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Expand explicit pairs and mesh rules into a normalized undirected pair
    /// set. Self-pairs are dropped.
    pub fn required_pairs(&self) -> BTreeSet<(String, String)> {
        let mut required = BTreeSet::new();
        for (a, b) in &self.pairs {
            if let Some(pair) = normalize(a, b) {
                required.insert(pair);
            }
        }
        for rule in &self.full_mesh {
            for left in &rule.left {
                for right in &rule.right {
                    if let Some(pair) = normalize(left, right) {
                        required.insert(pair);
                    }
                }
            }
        }
        required
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.full_mesh.is_empty()
    }
}

fn normalize(a: &str, b: &str) -> Option<(String, String)> {
    match a.cmp(b) {
        std::cmp::Ordering::Less => Some((a.to_string(), b.to_string())),
        std::cmp::Ordering::Greater => Some((b.to_string(), a.to_string())),
        std::cmp::Ordering::Equal => None,
    }
}
