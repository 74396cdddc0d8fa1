//! Deterministic structured diff between two snapshots of the same device.
//!
//! Entries are emitted first in the fixed declared category order, then by
//! natural key ascending, so two diffs of identical inputs serialize
//! byte-identically regardless of capture timing or concurrency. Diffing is
//! pure: inputs are never mutated.

use crate::error::{FabricError, Result};
use crate::model::{Category, CategoryData, DeviceIdentity, Snapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// What happened to a record between the pre and post snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffAction {
    Added,
    Removed,
    Changed,
}

/// Single difference between two snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub action: DiffAction,
    pub category: Category,
    /// The record's natural key within its category.
    pub key: String,
    /// Pre-snapshot record; `None` for additions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    /// Post-snapshot record; `None` for removals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
}

/// Structured comparison result between two snapshots of one device.
///
/// Carries no timestamp of its own: diffs are transient derived artifacts,
/// and identical inputs must produce byte-identical serialized output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    pub device: DeviceIdentity,
    pub pre_label: String,
    pub post_label: String,
    /// Ordered differences: category order first, natural key second.
    pub entries: Vec<DiffEntry>,
    /// Categories excluded from comparison because either side carried a
    /// collection-error marker ("failed" is not comparable to "empty").
    pub skipped_categories: Vec<Category>,
}

impl SnapshotDiff {
    pub fn has_changes(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn added(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(|e| e.action == DiffAction::Added)
    }

    pub fn removed(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(|e| e.action == DiffAction::Removed)
    }

    pub fn changed(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(|e| e.action == DiffAction::Changed)
    }
}

/// Compare two snapshots of the same device.
///
/// Diffing snapshots of different devices is a configuration error, not a
/// condition to silently tolerate.
pub fn diff(pre: &Snapshot, post: &Snapshot) -> Result<SnapshotDiff> {
    if pre.device != post.device {
        return Err(FabricError::configuration(format!(
            "cannot diff snapshots of different devices: '{}' vs '{}'",
            pre.device.hostname, post.device.hostname
        )));
    }

    tracing::debug!(
        device = %pre.device.hostname,
        pre_label = %pre.label,
        post_label = %post.label,
        "computing snapshot diff"
    );

    let mut result = SnapshotDiff {
        device: pre.device.clone(),
        pre_label: pre.label.clone(),
        post_label: post.label.clone(),
        entries: Vec::new(),
        skipped_categories: Vec::new(),
    };

    // Identical content hashes mean identical category data; the per-record
    // comparison can be skipped, but failed-category markers still apply.
    let identical = pre.content_hash == post.content_hash && pre.content_hash != 0;

    for category in Category::ALL {
        match category {
            Category::BgpNeighbors => diff_category(
                &mut result,
                category,
                &pre.bgp_neighbors,
                &post.bgp_neighbors,
                identical,
            ),
            Category::EvpnRoutes => diff_category(
                &mut result,
                category,
                &pre.evpn_routes,
                &post.evpn_routes,
                identical,
            ),
            Category::Interfaces => diff_category(
                &mut result,
                category,
                &pre.interfaces,
                &post.interfaces,
                identical,
            ),
            Category::LldpNeighbors => diff_category(
                &mut result,
                category,
                &pre.lldp_neighbors,
                &post.lldp_neighbors,
                identical,
            ),
            Category::Routes => {
                diff_category(&mut result, category, &pre.routes, &post.routes, identical);
            }
        }
    }

    tracing::debug!(
        device = %pre.device.hostname,
        added = result.added().count(),
        removed = result.removed().count(),
        changed = result.changed().count(),
        "diff complete"
    );
    Ok(result)
}

/// Diff pre/post snapshot sets for a fleet of devices.
///
/// Only devices present in both sets are diffed, in sorted hostname order.
pub fn diff_all(
    pre: &BTreeMap<String, Snapshot>,
    post: &BTreeMap<String, Snapshot>,
) -> Result<BTreeMap<String, SnapshotDiff>> {
    let mut results = BTreeMap::new();
    for (host, pre_snapshot) in pre {
        if let Some(post_snapshot) = post.get(host) {
            results.insert(host.clone(), diff(pre_snapshot, post_snapshot)?);
        }
    }
    Ok(results)
}

fn diff_category<T: PartialEq + Serialize>(
    result: &mut SnapshotDiff,
    category: Category,
    pre: &CategoryData<T>,
    post: &CategoryData<T>,
    identical: bool,
) {
    if pre.is_failed() || post.is_failed() {
        result.skipped_categories.push(category);
        return;
    }
    if identical {
        return;
    }

    let keys: BTreeSet<&String> = pre.records.keys().chain(post.records.keys()).collect();
    for key in keys {
        match (pre.records.get(key), post.records.get(key)) {
            (None, Some(after)) => result.entries.push(DiffEntry {
                action: DiffAction::Added,
                category,
                key: key.clone(),
                before: None,
                after: to_value(after),
            }),
            (Some(before), None) => result.entries.push(DiffEntry {
                action: DiffAction::Removed,
                category,
                key: key.clone(),
                before: to_value(before),
                after: None,
            }),
            (Some(before), Some(after)) if before != after => result.entries.push(DiffEntry {
                action: DiffAction::Changed,
                category,
                key: key.clone(),
                before: to_value(before),
                after: to_value(after),
            }),
            _ => {}
        }
    }
}

fn to_value<T: Serialize>(record: &T) -> Option<Value> {
    serde_json::to_value(record).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceIdentity, Interface, InterfaceStatus};

    fn interface(name: &str, oper: InterfaceStatus) -> Interface {
        Interface {
            name: name.into(),
            admin_status: InterfaceStatus::Up,
            oper_status: oper,
            description: String::new(),
            speed: "100G".into(),
            mtu: 9216,
            input_errors: 0,
            output_errors: 0,
        }
    }

    fn snapshot_with_interface(label: &str, oper: InterfaceStatus) -> Snapshot {
        let mut snap = Snapshot::new(DeviceIdentity::new("leaf1", "arista", "eos"), label);
        snap.interfaces
            .records
            .insert("et-0/0/0".into(), interface("et-0/0/0", oper));
        snap.calculate_content_hash();
        snap
    }

    #[test]
    fn test_diff_same_snapshot_is_empty() {
        let snap = snapshot_with_interface("pre", InterfaceStatus::Up);
        let result = diff(&snap, &snap).expect("same device");
        assert!(!result.has_changes());
        assert!(result.skipped_categories.is_empty());
    }

    #[test]
    fn test_diff_different_devices_rejected() {
        let a = snapshot_with_interface("pre", InterfaceStatus::Up);
        let mut b = snapshot_with_interface("post", InterfaceStatus::Up);
        b.device = DeviceIdentity::new("leaf2", "arista", "eos");
        let err = diff(&a, &b).unwrap_err();
        assert!(matches!(err, FabricError::Configuration(_)));
    }

    #[test]
    fn test_interface_flap_is_single_changed_entry() {
        let pre = snapshot_with_interface("pre", InterfaceStatus::Up);
        let post = snapshot_with_interface("post", InterfaceStatus::Down);
        let result = diff(&pre, &post).expect("same device");
        assert_eq!(result.entries.len(), 1);
        let entry = &result.entries[0];
        assert_eq!(entry.action, DiffAction::Changed);
        assert_eq!(entry.category, Category::Interfaces);
        assert_eq!(entry.key, "et-0/0/0");
        assert!(entry.before.is_some());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_failed_category_is_skipped_not_diffed() {
        let pre = snapshot_with_interface("pre", InterfaceStatus::Up);
        let mut post = snapshot_with_interface("post", InterfaceStatus::Down);
        post.interfaces = CategoryData::failed("RPC timed out");
        post.calculate_content_hash();
        let result = diff(&pre, &post).expect("same device");
        assert!(result.entries.is_empty());
        assert_eq!(result.skipped_categories, vec![Category::Interfaces]);
    }
}
