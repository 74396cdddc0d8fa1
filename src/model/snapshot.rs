//! The snapshot: a normalized, timestamped capture of one device's state.

use super::{BgpNeighbor, DeviceIdentity, EvpnRoute, Interface, LldpNeighbor, Route};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

/// The closed set of state categories a snapshot carries.
///
/// `ALL` declares the fixed diff emission order (lexicographic over the
/// category names); diff output ordering must never depend on collection
/// order or map iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BgpNeighbors,
    EvpnRoutes,
    Interfaces,
    LldpNeighbors,
    Routes,
}

impl Category {
    /// All categories in the fixed declared (lexicographic) order.
    pub const ALL: [Category; 5] = [
        Category::BgpNeighbors,
        Category::EvpnRoutes,
        Category::Interfaces,
        Category::LldpNeighbors,
        Category::Routes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BgpNeighbors => "bgp_neighbors",
            Self::EvpnRoutes => "evpn_routes",
            Self::Interfaces => "interfaces",
            Self::LldpNeighbors => "lldp_neighbors",
            Self::Routes => "routes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One category's keyed records plus an explicit collection-error marker.
///
/// An empty `records` map with `error: None` means the device genuinely
/// reported nothing; `error: Some(..)` means the capability call failed and
/// the data is unknown. Callers must be able to tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryData<T> {
    /// Records keyed by the category's natural key, sorted by key.
    pub records: BTreeMap<String, T>,
    /// Error message from a failed capability call, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> CategoryData<T> {
    /// Successfully collected data.
    pub fn collected(records: BTreeMap<String, T>) -> Self {
        Self {
            records,
            error: None,
        }
    }

    /// A category whose capability call failed; no records, marked inline.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            records: BTreeMap::new(),
            error: Some(message.into()),
        }
    }

    /// Whether this category failed to collect.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

impl<T> Default for CategoryData<T> {
    fn default() -> Self {
        Self::collected(BTreeMap::new())
    }
}

/// Point-in-time capture of one device's observable state.
///
/// Created once by the snapshot engine and immutable thereafter; freely
/// shared read-only across the diff engine, topology builder, and validator.
/// This structure is also the persisted wire format and must round-trip
/// exactly through the snapshot store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Identity of the device this state belongs to.
    pub device: DeviceIdentity,
    /// Free-text label, e.g. `pre-change`.
    pub label: String,
    /// Capture timestamp.
    pub captured_at: DateTime<Utc>,
    pub bgp_neighbors: CategoryData<BgpNeighbor>,
    pub interfaces: CategoryData<Interface>,
    pub routes: CategoryData<Route>,
    pub lldp_neighbors: CategoryData<LldpNeighbor>,
    pub evpn_routes: CategoryData<EvpnRoute>,
    /// Content hash over the category data, for quick equality checks.
    #[serde(default)]
    pub content_hash: u64,
}

impl Snapshot {
    /// Create an empty snapshot for a device; categories are filled in by the
    /// snapshot engine.
    pub fn new(device: DeviceIdentity, label: impl Into<String>) -> Self {
        Self {
            device,
            label: label.into(),
            captured_at: Utc::now(),
            bgp_neighbors: CategoryData::default(),
            interfaces: CategoryData::default(),
            routes: CategoryData::default(),
            lldp_neighbors: CategoryData::default(),
            evpn_routes: CategoryData::default(),
            content_hash: 0,
        }
    }

    /// Calculate and store the content hash over all category data.
    ///
    /// The hash input is the JSON encoding of each category in the fixed
    /// declared order; `BTreeMap` keys make the encoding independent of
    /// collection order.
    pub fn calculate_content_hash(&mut self) {
        self.content_hash = 0;
        let mut input = Vec::new();
        for category in Category::ALL {
            input.extend(category.as_str().as_bytes());
            let encoded = match category {
                Category::BgpNeighbors => serde_json::to_vec(&self.bgp_neighbors),
                Category::EvpnRoutes => serde_json::to_vec(&self.evpn_routes),
                Category::Interfaces => serde_json::to_vec(&self.interfaces),
                Category::LldpNeighbors => serde_json::to_vec(&self.lldp_neighbors),
                Category::Routes => serde_json::to_vec(&self.routes),
            };
            if let Ok(bytes) = encoded {
                input.extend(bytes);
            }
        }
        self.content_hash = xxh3_64(&input);
    }

    /// Error markers for every category that failed to collect, in declared
    /// order.
    pub fn failed_categories(&self) -> Vec<(Category, &str)> {
        let mut failed = Vec::new();
        for category in Category::ALL {
            let error = match category {
                Category::BgpNeighbors => self.bgp_neighbors.error.as_deref(),
                Category::EvpnRoutes => self.evpn_routes.error.as_deref(),
                Category::Interfaces => self.interfaces.error.as_deref(),
                Category::LldpNeighbors => self.lldp_neighbors.error.as_deref(),
                Category::Routes => self.routes.error.as_deref(),
            };
            if let Some(message) = error {
                failed.push((category, message));
            }
        }
        failed
    }

    /// Whether any category failed to collect.
    pub fn is_partial(&self) -> bool {
        !self.failed_categories().is_empty()
    }
}
