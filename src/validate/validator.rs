//! Device-level validation battery over captured state.

use super::assertions;
use super::{Severity, ValidationReport, ValidationResult};
use crate::model::{BgpNeighbor, Category, EvpnRoute, Interface, InterfaceStatus, LldpNeighbor, Route, Snapshot};
use std::collections::BTreeMap;

const CHECK_CATEGORY_SKIPPED: &str = "category_skipped";
const CHECK_CATEGORY_FAILED: &str = "category_collection_failed";
const CHECK_LINK_STATE: &str = "links_operational";
const CHECK_ROUTES_PRESENT: &str = "routing_table_populated";
const CHECK_LLDP_PRESENT: &str = "lldp_neighbors_present";
const CHECK_EVPN_SUMMARY: &str = "evpn_route_summary";

/// Per-category state handed to [`StateValidator::run_full_validation`].
///
/// Omitted categories are skipped with an informational result, so a caller
/// that never captured EVPN data still gets a complete report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationInput<'a> {
    pub bgp_neighbors: Option<&'a BTreeMap<String, BgpNeighbor>>,
    pub interfaces: Option<&'a BTreeMap<String, Interface>>,
    pub routes: Option<&'a BTreeMap<String, Route>>,
    pub lldp_neighbors: Option<&'a BTreeMap<String, LldpNeighbor>>,
    pub evpn_routes: Option<&'a BTreeMap<String, EvpnRoute>>,
}

/// Runs the standard validation battery against one device's state.
///
/// Every check runs regardless of earlier failures; the report carries every
/// defect found in a single pass.
#[derive(Debug, Clone)]
pub struct StateValidator {
    device: String,
    error_threshold: u64,
}

impl StateValidator {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            error_threshold: 0,
        }
    }

    /// Allow interfaces to carry up to this many combined errors before the
    /// error check fails.
    pub fn with_error_threshold(mut self, threshold: u64) -> Self {
        self.error_threshold = threshold;
        self
    }

    /// Run the full battery over the supplied categories.
    pub fn run_full_validation(&self, input: ValidationInput<'_>) -> ValidationReport {
        let mut report = ValidationReport::new(self.device.clone());

        match input.bgp_neighbors {
            Some(neighbors) => report.add(tag(
                assertions::assert_all_bgp_established(neighbors),
                &self.device,
            )),
            None => report.add(skipped(Category::BgpNeighbors, &self.device)),
        }

        match input.interfaces {
            Some(interfaces) => {
                report.add(tag(check_link_state(interfaces), &self.device));
                report.add(tag(
                    assertions::assert_no_interface_errors(interfaces, self.error_threshold),
                    &self.device,
                ));
            }
            None => report.add(skipped(Category::Interfaces, &self.device)),
        }

        match input.routes {
            Some(routes) => report.add(tag(check_routes_present(routes), &self.device)),
            None => report.add(skipped(Category::Routes, &self.device)),
        }

        match input.lldp_neighbors {
            Some(neighbors) => report.add(tag(check_lldp_present(neighbors), &self.device)),
            None => report.add(skipped(Category::LldpNeighbors, &self.device)),
        }

        match input.evpn_routes {
            Some(routes) => report.add(tag(summarize_evpn(routes), &self.device)),
            None => report.add(skipped(Category::EvpnRoutes, &self.device)),
        }

        tracing::info!(
            device = %self.device,
            summary = %report.summary_line(),
            "validation complete"
        );
        report
    }

    /// Validate a snapshot directly. Categories whose collection failed are
    /// reported informationally with the collection error instead of being
    /// validated against unknown data.
    pub fn validate_snapshot(&self, snapshot: &Snapshot) -> ValidationReport {
        let input = ValidationInput {
            bgp_neighbors: available(&snapshot.bgp_neighbors.records, &snapshot.bgp_neighbors.error),
            interfaces: available(&snapshot.interfaces.records, &snapshot.interfaces.error),
            routes: available(&snapshot.routes.records, &snapshot.routes.error),
            lldp_neighbors: available(
                &snapshot.lldp_neighbors.records,
                &snapshot.lldp_neighbors.error,
            ),
            evpn_routes: available(&snapshot.evpn_routes.records, &snapshot.evpn_routes.error),
        };

        let mut report = self.run_full_validation(input);
        for (category, error) in snapshot.failed_categories() {
            report.add(
                ValidationResult::info(
                    CHECK_CATEGORY_FAILED,
                    format!("{category} could not be collected: {error}"),
                )
                .with_device(self.device.clone()),
            );
        }
        report
    }
}

fn available<'a, T>(
    records: &'a BTreeMap<String, T>,
    error: &Option<String>,
) -> Option<&'a BTreeMap<String, T>> {
    if error.is_some() {
        None
    } else {
        Some(records)
    }
}

fn tag(result: ValidationResult, device: &str) -> ValidationResult {
    if result.device.is_empty() {
        result.with_device(device)
    } else {
        result
    }
}

fn skipped(category: Category, device: &str) -> ValidationResult {
    ValidationResult::info(
        CHECK_CATEGORY_SKIPPED,
        format!("{category} not supplied; checks skipped"),
    )
    .with_device(device)
}

/// Interfaces that are administratively up must be operationally up.
fn check_link_state(interfaces: &BTreeMap<String, Interface>) -> ValidationResult {
    let down: Vec<&str> = interfaces
        .values()
        .filter(|i| i.admin_status == InterfaceStatus::Up && i.oper_status != InterfaceStatus::Up)
        .map(|i| i.name.as_str())
        .collect();

    if down.is_empty() {
        ValidationResult::pass(
            CHECK_LINK_STATE,
            format!("all {} enabled interfaces operational", interfaces.len()),
        )
    } else {
        ValidationResult::fail(
            CHECK_LINK_STATE,
            format!(
                "{} enabled interfaces not operational: {}",
                down.len(),
                down.join(", ")
            ),
            Severity::High,
        )
        .with_expected("up/up")
        .with_actual(down.join(", "))
    }
}

fn check_routes_present(routes: &BTreeMap<String, Route>) -> ValidationResult {
    if routes.is_empty() {
        ValidationResult::fail(
            CHECK_ROUTES_PRESENT,
            "routing table is empty",
            Severity::High,
        )
    } else {
        ValidationResult::pass(
            CHECK_ROUTES_PRESENT,
            format!("{} routes in table", routes.len()),
        )
    }
}

fn check_lldp_present(neighbors: &BTreeMap<String, LldpNeighbor>) -> ValidationResult {
    if neighbors.is_empty() {
        ValidationResult::fail(
            CHECK_LLDP_PRESENT,
            "no LLDP neighbors; device appears isolated",
            Severity::Medium,
        )
    } else {
        ValidationResult::pass(
            CHECK_LLDP_PRESENT,
            format!("{} LLDP neighbors seen", neighbors.len()),
        )
    }
}

/// EVPN presence varies legitimately by role, so the summary is
/// informational only.
fn summarize_evpn(routes: &BTreeMap<String, EvpnRoute>) -> ValidationResult {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for route in routes.values() {
        *counts.entry(route.route_type).or_default() += 1;
    }
    let breakdown: Vec<String> = counts
        .iter()
        .map(|(ty, count)| format!("type-{ty}: {count}"))
        .collect();
    let message = if breakdown.is_empty() {
        "no EVPN routes".to_string()
    } else {
        breakdown.join(", ")
    };
    ValidationResult::info(CHECK_EVPN_SUMMARY, message)
}
