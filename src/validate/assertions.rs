//! Assertion library: pure checks over already-captured state.
//!
//! Every assertion takes the relevant category's keyed records and returns a
//! [`ValidationResult`]; none of them touch a device or return an error. A
//! missing key is a failed check, not a fault.

use super::{Severity, ValidationResult};
use crate::model::{BgpNeighbor, BgpSessionState, EvpnRoute, Interface, InterfaceStatus, LldpNeighbor, Route};
use std::collections::BTreeMap;

pub const CHECK_BGP_ESTABLISHED: &str = "bgp_neighbor_established";
pub const CHECK_BGP_ALL_ESTABLISHED: &str = "all_bgp_established";
pub const CHECK_INTERFACE_UP: &str = "interface_up";
pub const CHECK_INTERFACE_ERRORS: &str = "interface_errors";
pub const CHECK_ROUTE_EXISTS: &str = "route_exists";
pub const CHECK_EVPN_ROUTE_TYPE: &str = "evpn_route_type";
pub const CHECK_LLDP_NEIGHBOR: &str = "lldp_neighbor";

/// Assert a specific BGP peer exists and is established.
pub fn assert_bgp_neighbor_established(
    neighbors: &BTreeMap<String, BgpNeighbor>,
    peer: &str,
) -> ValidationResult {
    match neighbors.get(peer) {
        None => ValidationResult::fail(
            CHECK_BGP_ESTABLISHED,
            format!("BGP peer {peer} not found in neighbor table"),
            Severity::Critical,
        )
        .with_expected("established")
        .with_actual("not_found"),
        Some(neighbor) if neighbor.state == BgpSessionState::Established => {
            ValidationResult::pass(
                CHECK_BGP_ESTABLISHED,
                format!("BGP peer {peer} is established (AS {})", neighbor.peer_as),
            )
        }
        Some(neighbor) => ValidationResult::fail(
            CHECK_BGP_ESTABLISHED,
            format!("BGP peer {peer} is {}, expected established", neighbor.state),
            Severity::Critical,
        )
        .with_expected("established")
        .with_actual(neighbor.state.as_str()),
    }
}

/// Assert every BGP session on the device is established.
///
/// Names every non-established peer in one result; an empty neighbor table
/// passes (nothing is down).
pub fn assert_all_bgp_established(neighbors: &BTreeMap<String, BgpNeighbor>) -> ValidationResult {
    let down: Vec<String> = neighbors
        .values()
        .filter(|n| n.state != BgpSessionState::Established)
        .map(|n| format!("{} ({})", n.peer_address, n.state))
        .collect();

    if down.is_empty() {
        ValidationResult::pass(
            CHECK_BGP_ALL_ESTABLISHED,
            format!("all {} BGP sessions established", neighbors.len()),
        )
    } else {
        ValidationResult::fail(
            CHECK_BGP_ALL_ESTABLISHED,
            format!("{} BGP sessions not established: {}", down.len(), down.join(", ")),
            Severity::Critical,
        )
        .with_expected("established")
        .with_actual(down.join(", "))
    }
}

/// Assert an interface is administratively and operationally up.
pub fn assert_interface_up(
    interfaces: &BTreeMap<String, Interface>,
    name: &str,
) -> ValidationResult {
    match interfaces.get(name) {
        None => ValidationResult::fail(
            CHECK_INTERFACE_UP,
            format!("interface {name} not found"),
            Severity::High,
        )
        .with_expected("up/up")
        .with_actual("not_found"),
        Some(interface)
            if interface.admin_status == InterfaceStatus::Up
                && interface.oper_status == InterfaceStatus::Up =>
        {
            ValidationResult::pass(CHECK_INTERFACE_UP, format!("interface {name} is up/up"))
        }
        Some(interface) => ValidationResult::fail(
            CHECK_INTERFACE_UP,
            format!(
                "interface {name} is {}/{}, expected up/up",
                interface.admin_status, interface.oper_status
            ),
            Severity::High,
        )
        .with_expected("up/up")
        .with_actual(format!("{}/{}", interface.admin_status, interface.oper_status)),
    }
}

/// Assert no interface carries more combined input+output errors than the
/// threshold allows.
pub fn assert_no_interface_errors(
    interfaces: &BTreeMap<String, Interface>,
    threshold: u64,
) -> ValidationResult {
    let noisy: Vec<String> = interfaces
        .values()
        .filter(|i| i.total_errors() > threshold)
        .map(|i| format!("{} ({} errors)", i.name, i.total_errors()))
        .collect();

    if noisy.is_empty() {
        ValidationResult::pass(
            CHECK_INTERFACE_ERRORS,
            format!("no interface exceeds {threshold} errors"),
        )
    } else {
        ValidationResult::fail(
            CHECK_INTERFACE_ERRORS,
            format!(
                "{} interfaces exceed the {threshold}-error threshold: {}",
                noisy.len(),
                noisy.join(", ")
            ),
            Severity::Medium,
        )
        .with_expected(format!("<= {threshold} errors"))
        .with_actual(noisy.join(", "))
    }
}

/// Assert a prefix is present in the routing table, optionally pinned to a
/// specific next-hop and/or protocol.
pub fn assert_route_exists(
    routes: &BTreeMap<String, Route>,
    prefix: &str,
    next_hop: Option<&str>,
    protocol: Option<&str>,
) -> ValidationResult {
    let candidates: Vec<&Route> = routes.values().filter(|r| r.prefix == prefix).collect();

    if candidates.is_empty() {
        return ValidationResult::fail(
            CHECK_ROUTE_EXISTS,
            format!("route {prefix} not found in routing table"),
            Severity::Critical,
        )
        .with_expected(prefix)
        .with_actual("not_found");
    }

    let matched = candidates.iter().find(|r| {
        next_hop.map_or(true, |nh| r.next_hop == nh)
            && protocol.map_or(true, |p| r.protocol == p)
    });

    match matched {
        Some(route) => ValidationResult::pass(
            CHECK_ROUTE_EXISTS,
            format!(
                "route {prefix} present via {} ({})",
                route.next_hop, route.protocol
            ),
        ),
        None => {
            let actual: Vec<String> = candidates
                .iter()
                .map(|r| format!("via {} ({})", r.next_hop, r.protocol))
                .collect();
            let mut wanted = prefix.to_string();
            if let Some(nh) = next_hop {
                wanted.push_str(&format!(" via {nh}"));
            }
            if let Some(p) = protocol {
                wanted.push_str(&format!(" ({p})"));
            }
            ValidationResult::fail(
                CHECK_ROUTE_EXISTS,
                format!("route {prefix} present but no path matches {wanted}"),
                Severity::Critical,
            )
            .with_expected(wanted)
            .with_actual(actual.join(", "))
        }
    }
}

/// Assert routes of the given EVPN route type exist, optionally requiring an
/// exact count.
pub fn assert_evpn_route_type(
    routes: &BTreeMap<String, EvpnRoute>,
    route_type: u8,
    expected_count: Option<usize>,
) -> ValidationResult {
    let count = routes.values().filter(|r| r.route_type == route_type).count();

    match expected_count {
        Some(expected) if count != expected => ValidationResult::fail(
            CHECK_EVPN_ROUTE_TYPE,
            format!("expected {expected} EVPN type-{route_type} routes, found {count}"),
            Severity::High,
        )
        .with_expected(expected.to_string())
        .with_actual(count.to_string()),
        Some(expected) => ValidationResult::pass(
            CHECK_EVPN_ROUTE_TYPE,
            format!("{expected} EVPN type-{route_type} routes present"),
        ),
        None if count == 0 => ValidationResult::fail(
            CHECK_EVPN_ROUTE_TYPE,
            format!("no EVPN type-{route_type} routes found"),
            Severity::High,
        )
        .with_expected(format!("type-{route_type} > 0"))
        .with_actual("0"),
        None => ValidationResult::pass(
            CHECK_EVPN_ROUTE_TYPE,
            format!("{count} EVPN type-{route_type} routes present"),
        ),
    }
}

/// Assert the given local interface has an LLDP neighbor, optionally a
/// specific remote system.
pub fn assert_lldp_neighbor(
    neighbors: &BTreeMap<String, LldpNeighbor>,
    local_interface: &str,
    expected_remote: Option<&str>,
) -> ValidationResult {
    match neighbors.get(local_interface) {
        None => ValidationResult::fail(
            CHECK_LLDP_NEIGHBOR,
            format!("no LLDP neighbor on {local_interface}"),
            Severity::High,
        )
        .with_expected(expected_remote.unwrap_or("any neighbor").to_string())
        .with_actual("not_found"),
        Some(neighbor) => match expected_remote {
            Some(remote) if neighbor.remote_system != remote => ValidationResult::fail(
                CHECK_LLDP_NEIGHBOR,
                format!(
                    "{local_interface} sees {} {}, expected {remote}",
                    neighbor.remote_system, neighbor.remote_port
                ),
                Severity::High,
            )
            .with_expected(remote.to_string())
            .with_actual(neighbor.remote_system.clone()),
            _ => ValidationResult::pass(
                CHECK_LLDP_NEIGHBOR,
                format!(
                    "{local_interface} connected to {} {}",
                    neighbor.remote_system, neighbor.remote_port
                ),
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor(peer: &str, state: BgpSessionState) -> BgpNeighbor {
        BgpNeighbor {
            peer_address: peer.into(),
            state,
            peer_as: 65001,
            local_as: 65000,
            uptime_secs: 3600,
            input_messages: 100,
            output_messages: 100,
            flap_count: 0,
        }
    }

    fn bgp_table() -> BTreeMap<String, BgpNeighbor> {
        let mut table = BTreeMap::new();
        table.insert(
            "10.0.0.1".into(),
            neighbor("10.0.0.1", BgpSessionState::Established),
        );
        table.insert("10.0.0.3".into(), neighbor("10.0.0.3", BgpSessionState::Active));
        table
    }

    fn interface(name: &str, oper: InterfaceStatus, errors: u64) -> Interface {
        Interface {
            name: name.into(),
            admin_status: InterfaceStatus::Up,
            oper_status: oper,
            description: String::new(),
            speed: "100G".into(),
            mtu: 9216,
            input_errors: errors,
            output_errors: 0,
        }
    }

    #[test]
    fn test_bgp_missing_peer_fails_critical() {
        let result = assert_bgp_neighbor_established(&bgp_table(), "10.0.0.9");
        assert!(!result.passed);
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(result.actual.as_deref(), Some("not_found"));
    }

    #[test]
    fn test_bgp_non_established_peer_fails_with_state() {
        let result = assert_bgp_neighbor_established(&bgp_table(), "10.0.0.3");
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("active"));
    }

    #[test]
    fn test_all_bgp_names_every_down_peer() {
        let result = assert_all_bgp_established(&bgp_table());
        assert!(!result.passed);
        assert!(result.message.contains("10.0.0.3"));
        assert!(!result.message.contains("10.0.0.1 "));
    }

    #[test]
    fn test_all_bgp_empty_table_passes() {
        let result = assert_all_bgp_established(&BTreeMap::new());
        assert!(result.passed);
    }

    #[test]
    fn test_interface_up_and_down() {
        let mut interfaces = BTreeMap::new();
        interfaces.insert("et-0/0/0".to_string(), interface("et-0/0/0", InterfaceStatus::Up, 0));
        interfaces.insert("et-0/0/1".to_string(), interface("et-0/0/1", InterfaceStatus::Down, 0));

        assert!(assert_interface_up(&interfaces, "et-0/0/0").passed);
        let down = assert_interface_up(&interfaces, "et-0/0/1");
        assert!(!down.passed);
        assert_eq!(down.actual.as_deref(), Some("up/down"));
        assert!(!assert_interface_up(&interfaces, "xe-9/9/9").passed);
    }

    #[test]
    fn test_interface_errors_respect_threshold() {
        let mut interfaces = BTreeMap::new();
        interfaces.insert("et-0/0/0".to_string(), interface("et-0/0/0", InterfaceStatus::Up, 5));

        assert!(assert_no_interface_errors(&interfaces, 10).passed);
        let over = assert_no_interface_errors(&interfaces, 4);
        assert!(!over.passed);
        assert!(over.message.contains("et-0/0/0"));
    }

    #[test]
    fn test_route_exists_with_filters() {
        let mut routes = BTreeMap::new();
        let route = Route {
            prefix: "10.0.0.0/24".into(),
            next_hop: "10.1.1.1".into(),
            protocol: "bgp".into(),
            preference: 170,
            metric: 0,
        };
        routes.insert(route.natural_key(), route);

        assert!(assert_route_exists(&routes, "10.0.0.0/24", None, None).passed);
        assert!(assert_route_exists(&routes, "10.0.0.0/24", Some("10.1.1.1"), Some("bgp")).passed);

        let wrong_hop = assert_route_exists(&routes, "10.0.0.0/24", Some("10.1.1.2"), None);
        assert!(!wrong_hop.passed);
        assert!(wrong_hop.message.contains("no path matches"));

        let missing = assert_route_exists(&routes, "192.168.0.0/16", None, None);
        assert!(!missing.passed);
        assert_eq!(missing.actual.as_deref(), Some("not_found"));
    }

    #[test]
    fn test_evpn_route_type_counts() {
        let mut routes = BTreeMap::new();
        for i in 0..3u32 {
            let route = EvpnRoute {
                route_type: 2,
                route_distinguisher: format!("10.0.0.1:{i}"),
                prefix: format!("aa:bb:cc:dd:ee:0{i}"),
                vni: 100,
                next_hop: "10.0.0.1".into(),
            };
            routes.insert(route.natural_key(), route);
        }

        assert!(assert_evpn_route_type(&routes, 2, Some(3)).passed);
        assert!(assert_evpn_route_type(&routes, 2, None).passed);
        assert!(!assert_evpn_route_type(&routes, 2, Some(4)).passed);
        assert!(!assert_evpn_route_type(&routes, 5, None).passed);
    }

    #[test]
    fn test_lldp_neighbor_expected_remote() {
        let mut neighbors = BTreeMap::new();
        neighbors.insert(
            "et-0/0/0".to_string(),
            LldpNeighbor {
                local_interface: "et-0/0/0".into(),
                remote_system: "spine1".into(),
                remote_port: "et-0/0/1".into(),
            },
        );

        assert!(assert_lldp_neighbor(&neighbors, "et-0/0/0", None).passed);
        assert!(assert_lldp_neighbor(&neighbors, "et-0/0/0", Some("spine1")).passed);
        assert!(!assert_lldp_neighbor(&neighbors, "et-0/0/0", Some("spine2")).passed);
        assert!(!assert_lldp_neighbor(&neighbors, "et-0/0/1", None).passed);
    }
}
