//! Shared fixtures for integration tests: a small spine/leaf fabric.

#![allow(dead_code)]

use fabric_tools::driver::DeviceDriver;
use fabric_tools::error::{FabricError, Result};
use fabric_tools::model::{
    BgpNeighbor, BgpSessionState, CategoryData, DeviceIdentity, EvpnRoute, Interface,
    InterfaceStatus, LldpNeighbor, Route, Snapshot,
};
use std::collections::BTreeMap;

pub fn identity(host: &str) -> DeviceIdentity {
    DeviceIdentity::new(host, "arista", "eos")
}

pub fn bgp_neighbor(peer: &str, state: BgpSessionState) -> BgpNeighbor {
    BgpNeighbor {
        peer_address: peer.to_string(),
        state,
        peer_as: 65001,
        local_as: 65000,
        uptime_secs: 86_400,
        input_messages: 1_200,
        output_messages: 1_180,
        flap_count: 0,
    }
}

/// Two established peers plus one stuck in `active`.
pub fn sample_bgp() -> BTreeMap<String, BgpNeighbor> {
    let mut table = BTreeMap::new();
    for (peer, state) in [
        ("10.0.0.1", BgpSessionState::Established),
        ("10.0.0.2", BgpSessionState::Established),
        ("10.0.0.3", BgpSessionState::Active),
    ] {
        table.insert(peer.to_string(), bgp_neighbor(peer, state));
    }
    table
}

pub fn interface(name: &str, oper: InterfaceStatus) -> Interface {
    Interface {
        name: name.to_string(),
        admin_status: InterfaceStatus::Up,
        oper_status: oper,
        description: String::new(),
        speed: "100G".to_string(),
        mtu: 9214,
        input_errors: 0,
        output_errors: 0,
    }
}

pub fn sample_interfaces() -> BTreeMap<String, Interface> {
    let mut table = BTreeMap::new();
    for name in ["et-0/0/0", "et-0/0/1", "et-0/0/2", "lo0"] {
        table.insert(name.to_string(), interface(name, InterfaceStatus::Up));
    }
    table
}

pub fn route(prefix: &str, next_hop: &str, protocol: &str) -> Route {
    Route {
        prefix: prefix.to_string(),
        next_hop: next_hop.to_string(),
        protocol: protocol.to_string(),
        preference: 170,
        metric: 0,
    }
}

pub fn sample_routes() -> BTreeMap<String, Route> {
    let mut table = BTreeMap::new();
    for r in [
        route("0.0.0.0/0", "10.255.0.1", "static"),
        route("10.0.0.0/24", "10.1.1.1", "bgp"),
        route("10.0.1.0/24", "10.1.1.2", "bgp"),
    ] {
        table.insert(r.natural_key(), r);
    }
    table
}

pub fn lldp(local_if: &str, remote_sys: &str, remote_port: &str) -> LldpNeighbor {
    LldpNeighbor {
        local_interface: local_if.to_string(),
        remote_system: remote_sys.to_string(),
        remote_port: remote_port.to_string(),
    }
}

pub fn sample_lldp() -> BTreeMap<String, LldpNeighbor> {
    let mut table = BTreeMap::new();
    for n in [
        lldp("et-0/0/0", "spine1", "et-0/0/1"),
        lldp("et-0/0/1", "spine2", "et-0/0/1"),
    ] {
        table.insert(n.local_interface.clone(), n);
    }
    table
}

pub fn evpn(route_type: u8, rd: &str, prefix: &str) -> EvpnRoute {
    EvpnRoute {
        route_type,
        route_distinguisher: rd.to_string(),
        prefix: prefix.to_string(),
        vni: 10_100,
        next_hop: "10.0.0.1".to_string(),
    }
}

pub fn sample_evpn() -> BTreeMap<String, EvpnRoute> {
    let mut table = BTreeMap::new();
    for r in [
        evpn(2, "10.0.0.1:100", "aa:bb:cc:dd:ee:01"),
        evpn(2, "10.0.0.1:100", "aa:bb:cc:dd:ee:02"),
        evpn(5, "10.0.0.1:100", "192.168.10.0/24"),
    ] {
        table.insert(r.natural_key(), r);
    }
    table
}

/// A fully populated snapshot for one device.
pub fn full_snapshot(host: &str, label: &str) -> Snapshot {
    let mut snap = Snapshot::new(identity(host), label);
    snap.bgp_neighbors = CategoryData::collected(sample_bgp());
    snap.interfaces = CategoryData::collected(sample_interfaces());
    snap.routes = CategoryData::collected(sample_routes());
    snap.lldp_neighbors = CategoryData::collected(sample_lldp());
    snap.evpn_routes = CategoryData::collected(sample_evpn());
    snap.calculate_content_hash();
    snap
}

/// Snapshot carrying only LLDP data, for topology scenarios.
pub fn lldp_snapshot(host: &str, neighbors: &[(&str, &str, &str)]) -> Snapshot {
    let mut snap = Snapshot::new(identity(host), "capture");
    let mut table = BTreeMap::new();
    for (local_if, remote_sys, remote_port) in neighbors {
        table.insert(
            (*local_if).to_string(),
            lldp(local_if, remote_sys, remote_port),
        );
    }
    snap.lldp_neighbors = CategoryData::collected(table);
    snap.calculate_content_hash();
    snap
}

/// In-memory driver serving the shared fixtures, with per-capability failure
/// switches.
pub struct MockDriver {
    pub identity: DeviceIdentity,
    pub fail_bgp: bool,
    pub fail_evpn: bool,
}

impl MockDriver {
    pub fn new(host: &str) -> Self {
        Self {
            identity: identity(host),
            fail_bgp: false,
            fail_evpn: false,
        }
    }
}

impl DeviceDriver for MockDriver {
    fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    fn get_bgp_neighbors(&self) -> Result<BTreeMap<String, BgpNeighbor>> {
        if self.fail_bgp {
            return Err(FabricError::collection(
                &self.identity.hostname,
                "bgp_neighbors",
                "RPC timed out",
            ));
        }
        Ok(sample_bgp())
    }

    fn get_interfaces(&self) -> Result<BTreeMap<String, Interface>> {
        Ok(sample_interfaces())
    }

    fn get_routing_table(&self) -> Result<Vec<Route>> {
        Ok(sample_routes().into_values().collect())
    }

    fn get_lldp_neighbors(&self) -> Result<BTreeMap<String, LldpNeighbor>> {
        Ok(sample_lldp())
    }

    fn get_evpn_routes(&self) -> Result<Vec<EvpnRoute>> {
        if self.fail_evpn {
            return Err(FabricError::collection(
                &self.identity.hostname,
                "evpn_routes",
                "table walk aborted",
            ));
        }
        Ok(sample_evpn().into_values().collect())
    }
}
