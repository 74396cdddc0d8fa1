//! **State snapshot, diff, and validation for multi-vendor network fabrics.**
//!
//! `fabric-tools` captures structured per-device operational state into
//! immutable [`Snapshot`]s, computes deterministic structured diffs between
//! captures, builds and verifies an LLDP adjacency graph across devices, and
//! runs an assertion battery that aggregates into a [`ValidationReport`].
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The vendor-neutral data model. Drivers normalize whatever
//!   their platform returns into these typed records; everything downstream
//!   (diff, topology, validation) works on this model only.
//! - **[`driver`]**: The [`DeviceDriver`] capability trait and the explicit
//!   vendor-to-factory [`DriverRegistry`]. Vendor implementations live
//!   outside this crate.
//! - **[`snapshot`]**: The [`SnapshotEngine`] (single and bounded-concurrency
//!   multi-device capture) and the JSON-file [`SnapshotStore`].
//! - **[`diff`]**: Deterministic keyed diff between two snapshots of the same
//!   device; identical inputs serialize byte-identically.
//! - **[`topology`]**: LLDP adjacency graph construction plus asymmetry,
//!   expected-adjacency, and connectivity verification.
//! - **[`validate`]**: Pure assertions, the [`StateValidator`] battery, and
//!   the [`ValidationReport`] result model. Check failures are data, never
//!   errors.
//! - **[`reports`]**: JSON / Markdown / summary rendering for diffs and
//!   validation reports.
//!
//! ## Diffing two captures
//!
//! ```no_run
//! use std::path::Path;
//! use fabric_tools::{diff, snapshot::SnapshotStore};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pre = SnapshotStore::load(Path::new("leaf1_pre-change.json"))?;
//!     let post = SnapshotStore::load(Path::new("leaf1_post-change.json"))?;
//!
//!     let result = diff::diff(&pre, &post)?;
//!     for entry in &result.entries {
//!         println!("{:?} {} {}", entry.action, entry.category, entry.key);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Validating a snapshot
//!
//! ```no_run
//! use std::path::Path;
//! use fabric_tools::snapshot::SnapshotStore;
//! use fabric_tools::validate::StateValidator;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let snapshot = SnapshotStore::load(Path::new("leaf1_post-change.json"))?;
//!     let validator = StateValidator::new(snapshot.device.hostname.clone());
//!     let report = validator.validate_snapshot(&snapshot);
//!
//!     println!("{}", report.summary_line());
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `pre`/`post` or `a`/`b` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod diff;
pub mod driver;
pub mod error;
pub mod model;
pub mod reports;
pub mod snapshot;
pub mod topology;
pub mod validate;

// Re-export main types for convenience
pub use diff::{DiffAction, DiffEntry, SnapshotDiff};
pub use driver::{DeviceDriver, DriverFactory, DriverRegistry};
pub use error::{FabricError, Result};
pub use model::{
    BgpNeighbor, BgpSessionState, Category, CategoryData, DeviceIdentity, EvpnRoute, Interface,
    InterfaceStatus, LldpNeighbor, Route, Snapshot,
};
pub use reports::ReportFormat;
pub use snapshot::{CaptureOptions, CaptureOutcome, SnapshotEngine, SnapshotStore};
pub use topology::{AdjacencyEdge, AdjacencyGraph, ExpectedTopology};
pub use validate::{
    Severity, StateValidator, ValidationInput, ValidationReport, ValidationResult,
};
