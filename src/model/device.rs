//! Device identity and normalized protocol state enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the device that owns a snapshot. Immutable once set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// DNS name or management address of the device.
    pub hostname: String,
    /// Vendor identifier (e.g. `juniper`, `cisco`, `arista`).
    pub vendor: String,
    /// Platform string (e.g. `junos`, `iosxe`, `eos`).
    pub platform: String,
}

impl DeviceIdentity {
    pub fn new(
        hostname: impl Into<String>,
        vendor: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            vendor: vendor.into(),
            platform: platform.into(),
        }
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.hostname, self.vendor, self.platform)
    }
}

/// BGP session state machine values, vendor-normalized by the driver layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BgpSessionState {
    Idle,
    Connect,
    Active,
    OpenSent,
    OpenConfirm,
    Established,
    Unknown,
}

impl BgpSessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connect => "connect",
            Self::Active => "active",
            Self::OpenSent => "opensent",
            Self::OpenConfirm => "openconfirm",
            Self::Established => "established",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for BgpSessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational or administrative status of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceStatus {
    Up,
    Down,
    AdminDown,
    Unknown,
}

impl InterfaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::AdminDown => "admin-down",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for InterfaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
