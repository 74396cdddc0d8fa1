//! Snapshot capture and persistence.
//!
//! The engine turns driver capability calls into immutable [`Snapshot`]
//! instances; the store serializes them to durable JSON files. All vendor
//! interaction is delegated to the [`crate::driver::DeviceDriver`] boundary.
//!
//! [`Snapshot`]: crate::model::Snapshot

mod engine;
mod store;

pub use engine::{CaptureOptions, CaptureOutcome, SnapshotEngine};
pub use store::SnapshotStore;
