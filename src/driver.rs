//! The driver boundary: the capability set this crate consumes.
//!
//! Vendor drivers live outside this crate; they normalize native device
//! output (NETCONF, eAPI, SSH screen-scraping, ...) into the model types.
//! This module defines the trait they implement and an explicit registration
//! table for constructing them by vendor name. There is no process-wide
//! registry: callers build a [`DriverRegistry`] and pass it where needed.

use crate::error::{FabricError, Result};
use crate::model::{BgpNeighbor, DeviceIdentity, EvpnRoute, Interface, LldpNeighbor, Route};
use std::collections::BTreeMap;

/// Capability set every vendor driver presents to the snapshot engine.
///
/// All methods are blocking; implementations own their session/transport
/// state. Routing and EVPN tables come back as ordered sequences because
/// devices report them that way; the snapshot engine keys them by their
/// natural key.
pub trait DeviceDriver: Send + Sync {
    /// Identity of the device this driver is bound to.
    fn identity(&self) -> &DeviceIdentity;

    /// BGP neighbor table, keyed by peer address.
    fn get_bgp_neighbors(&self) -> Result<BTreeMap<String, BgpNeighbor>>;

    /// Interface table, keyed by interface name.
    fn get_interfaces(&self) -> Result<BTreeMap<String, Interface>>;

    /// The RIB as an ordered sequence of route entries.
    fn get_routing_table(&self) -> Result<Vec<Route>>;

    /// LLDP adjacencies, keyed by local interface.
    fn get_lldp_neighbors(&self) -> Result<BTreeMap<String, LldpNeighbor>>;

    /// EVPN route table as an ordered sequence.
    fn get_evpn_routes(&self) -> Result<Vec<EvpnRoute>>;
}

/// Factory closure producing an unconnected driver for a device.
pub type DriverFactory = Box<dyn Fn(&DeviceIdentity) -> Box<dyn DeviceDriver> + Send + Sync>;

/// Explicit vendor-name → driver-factory table.
///
/// Vendor lookup is case-insensitive. Unknown vendors are a configuration
/// error, never silently defaulted.
#[derive(Default)]
pub struct DriverRegistry {
    factories: BTreeMap<String, DriverFactory>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under a vendor or platform name.
    pub fn register(&mut self, vendor: impl Into<String>, factory: DriverFactory) {
        let vendor = vendor.into().to_lowercase();
        tracing::info!(vendor = %vendor, "registered driver factory");
        self.factories.insert(vendor, factory);
    }

    /// Create a driver for the given device based on its vendor field.
    pub fn create(&self, identity: &DeviceIdentity) -> Result<Box<dyn DeviceDriver>> {
        let vendor = identity.vendor.to_lowercase();
        let factory = self.factories.get(&vendor).ok_or_else(|| {
            FabricError::configuration(format!(
                "Unsupported vendor '{}'. Supported: {}",
                identity.vendor,
                self.supported_vendors().join(", ")
            ))
        })?;
        tracing::debug!(device = %identity.hostname, vendor = %vendor, "creating driver");
        Ok(factory(identity))
    }

    /// Sorted list of registered vendor names.
    pub fn supported_vendors(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullDriver {
        identity: DeviceIdentity,
    }

    impl DeviceDriver for NullDriver {
        fn identity(&self) -> &DeviceIdentity {
            &self.identity
        }
        fn get_bgp_neighbors(&self) -> Result<BTreeMap<String, BgpNeighbor>> {
            Ok(BTreeMap::new())
        }
        fn get_interfaces(&self) -> Result<BTreeMap<String, Interface>> {
            Ok(BTreeMap::new())
        }
        fn get_routing_table(&self) -> Result<Vec<Route>> {
            Ok(Vec::new())
        }
        fn get_lldp_neighbors(&self) -> Result<BTreeMap<String, LldpNeighbor>> {
            Ok(BTreeMap::new())
        }
        fn get_evpn_routes(&self) -> Result<Vec<EvpnRoute>> {
            Ok(Vec::new())
        }
    }

    fn registry() -> DriverRegistry {
        let mut registry = DriverRegistry::new();
        registry.register(
            "arista",
            Box::new(|identity| {
                Box::new(NullDriver {
                    identity: identity.clone(),
                })
            }),
        );
        registry
    }

    #[test]
    fn test_create_known_vendor_case_insensitive() {
        let registry = registry();
        let identity = DeviceIdentity::new("leaf1", "Arista", "eos");
        let driver = registry.create(&identity).expect("vendor is registered");
        assert_eq!(driver.identity().hostname, "leaf1");
    }

    #[test]
    fn test_create_unknown_vendor_is_configuration_error() {
        let registry = registry();
        let identity = DeviceIdentity::new("wan1", "cisco", "iosxe");
        let err = match registry.create(&identity) {
            Ok(_) => panic!("expected an error for an unknown vendor"),
            Err(err) => err,
        };
        match err {
            FabricError::Configuration(msg) => {
                assert!(msg.contains("cisco"), "should name the vendor: {msg}");
                assert!(msg.contains("arista"), "should list supported: {msg}");
            }
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_supported_vendors_sorted() {
        let mut registry = registry();
        registry.register(
            "juniper",
            Box::new(|identity| {
                Box::new(NullDriver {
                    identity: identity.clone(),
                })
            }),
        );
        assert_eq!(registry.supported_vendors(), vec!["arista", "juniper"]);
    }
}
