// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Route;

fn is_false(v: &bool) -> bool {
    !*v
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
/// Resources missing in one side of the comparison.
///
/// When placed as [InterfaceDiff::system_state], it holds what netplan
/// defines but the system lacks. When placed as
/// [InterfaceDiff::netplan_state], it holds what the system has but netplan
/// does not define.
pub struct DiffState {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Addresses in `ip/prefix` form.
    pub missing_addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_nameservers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_search_domains: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_routes: Vec<Route>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// MAC address found in the other side.
    pub missing_macaddress: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    /// DHCPv4 is enabled in netplan but no DHCPv4 address was obtained.
    /// Only used in [InterfaceDiff::system_state].
    pub missing_dhcp4_address: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    /// DHCPv6 is enabled in netplan but no DHCPv6 address was obtained.
    /// Only used in [InterfaceDiff::system_state].
    pub missing_dhcp6_address: bool,
}

impl DiffState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
/// Differences found for one interface.
pub struct InterfaceDiff {
    /// Kernel interface name.
    pub name: String,
    #[serde(default)]
    pub system_state: DiffState,
    #[serde(default)]
    pub netplan_state: DiffState,
}

impl InterfaceDiff {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.system_state.is_empty() && self.netplan_state.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
/// Result of comparing the system state against netplan configuration.
/// Example YAML:
/// ```yaml
/// interfaces:
///   eth0:
///     name: eth0
///     system_state:
///       missing_addresses:
///       - 192.0.2.1/24
///       missing_dhcp4_address: true
///     netplan_state:
///       missing_nameservers:
///       - 192.0.2.53
/// missing_interfaces_system:
/// - eth1
/// missing_interfaces_netplan:
/// - docker0
/// ```
pub struct DiffReport {
    #[serde(default)]
    /// Differences indexed by netdef ID.
    pub interfaces: BTreeMap<String, InterfaceDiff>,
    #[serde(default)]
    /// Netdef IDs defined in netplan but not found in the system, sorted.
    pub missing_interfaces_system: Vec<String>,
    #[serde(default)]
    /// Names of system interfaces not defined in netplan, sorted.
    pub missing_interfaces_netplan: Vec<String>,
}

impl DiffReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no difference was found at all.
    pub fn is_empty(&self) -> bool {
        self.missing_interfaces_system.is_empty()
            && self.missing_interfaces_netplan.is_empty()
            && self.interfaces.values().all(InterfaceDiff::is_empty)
    }
}
