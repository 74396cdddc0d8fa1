//! Canonical, vendor-neutral representation of device state.
//!
//! Drivers normalize their vendor-specific output into these types; every
//! downstream consumer (diff engine, topology builder, validator, reports)
//! works only on this model.

mod device;
mod records;
mod snapshot;

pub use device::{BgpSessionState, DeviceIdentity, InterfaceStatus};
pub use records::{BgpNeighbor, EvpnRoute, Interface, LldpNeighbor, Route};
pub use snapshot::{Category, CategoryData, Snapshot};
