//! Per-category state records with stable natural keys.
//!
//! Every record type carries the fields the diff engine compares structurally
//! and exposes the natural key that identifies it across captures. Key
//! stability is the invariant the diff engine depends on: the same logical
//! entity must map to the same key in every capture.

use super::{BgpSessionState, InterfaceStatus};
use serde::{Deserialize, Serialize};

/// One BGP session as seen from the local device. Keyed by peer address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BgpNeighbor {
    /// Peer address, the natural key.
    pub peer_address: String,
    pub state: BgpSessionState,
    pub peer_as: u32,
    pub local_as: u32,
    /// Session uptime in seconds; zero for sessions that never established.
    #[serde(default)]
    pub uptime_secs: u64,
    #[serde(default)]
    pub input_messages: u64,
    #[serde(default)]
    pub output_messages: u64,
    #[serde(default)]
    pub flap_count: u32,
}

impl BgpNeighbor {
    pub fn natural_key(&self) -> String {
        self.peer_address.clone()
    }
}

/// Interface status and counters. Keyed by interface name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    /// Interface name, the natural key.
    pub name: String,
    pub admin_status: InterfaceStatus,
    pub oper_status: InterfaceStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub speed: String,
    #[serde(default)]
    pub mtu: u32,
    #[serde(default)]
    pub input_errors: u64,
    #[serde(default)]
    pub output_errors: u64,
}

impl Interface {
    pub fn natural_key(&self) -> String {
        self.name.clone()
    }

    /// Combined error counter used by the no-errors assertion.
    pub fn total_errors(&self) -> u64 {
        self.input_errors + self.output_errors
    }
}

/// One RIB entry. Keyed by prefix plus next-hop, since a prefix can be
/// reachable via several next-hops (ECMP) and each path is its own record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub prefix: String,
    pub next_hop: String,
    pub protocol: String,
    #[serde(default)]
    pub preference: u32,
    #[serde(default)]
    pub metric: u32,
}

impl Route {
    pub fn natural_key(&self) -> String {
        format!("{} via {}", self.prefix, self.next_hop)
    }
}

/// One LLDP adjacency as reported by the local device. Keyed by local
/// interface (LLDP reports at most one neighbor per port in this model).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LldpNeighbor {
    /// Local interface, the natural key.
    pub local_interface: String,
    pub remote_system: String,
    pub remote_port: String,
}

impl LldpNeighbor {
    pub fn natural_key(&self) -> String {
        self.local_interface.clone()
    }
}

/// One EVPN route. Keyed by route distinguisher plus prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvpnRoute {
    /// EVPN route type (2 = MAC/IP advertisement, 5 = IP prefix).
    pub route_type: u8,
    pub route_distinguisher: String,
    pub prefix: String,
    #[serde(default)]
    pub vni: u32,
    #[serde(default)]
    pub next_hop: String,
}

impl EvpnRoute {
    pub fn natural_key(&self) -> String {
        format!("{} {}", self.route_distinguisher, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_key_distinguishes_ecmp_paths() {
        let a = Route {
            prefix: "10.0.0.0/24".into(),
            next_hop: "10.1.1.1".into(),
            protocol: "bgp".into(),
            preference: 170,
            metric: 0,
        };
        let mut b = a.clone();
        b.next_hop = "10.1.1.2".into();
        assert_ne!(a.natural_key(), b.natural_key());
        assert_eq!(a.natural_key(), "10.0.0.0/24 via 10.1.1.1");
    }

    #[test]
    fn test_evpn_key_combines_rd_and_prefix() {
        let route = EvpnRoute {
            route_type: 2,
            route_distinguisher: "10.0.0.1:1".into(),
            prefix: "aa:bb:cc:dd:ee:ff".into(),
            vni: 100,
            next_hop: "10.0.0.1".into(),
        };
        assert_eq!(route.natural_key(), "10.0.0.1:1 aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn test_record_value_equality_is_structural() {
        let a = LldpNeighbor {
            local_interface: "et-0/0/0".into(),
            remote_system: "spine1".into(),
            remote_port: "et-0/0/1".into(),
        };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.remote_port = "et-0/0/2".into();
        assert_ne!(a, b);
    }
}
