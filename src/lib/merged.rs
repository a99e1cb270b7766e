// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::ip::is_valid_ip_network;

use crate::{
    AddressFlags, InterfaceType, NetDefinition, NetplanState, Route,
    SystemInterface, SystemState,
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[non_exhaustive]
/// Live side of a [MergedInterface].
pub struct SystemInterfaceState {
    #[serde(rename = "type")]
    pub iface_type: InterfaceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Netplan definition ID of this interface.
    pub id: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    /// Addresses in `ip/prefix` form with their flags.
    pub addresses: BTreeMap<String, AddressFlags>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    /// Routes normalized into the netplan [Route] shape.
    pub routes: Vec<Route>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macaddress: Option<String>,
}

impl From<&SystemInterface> for SystemInterfaceState {
    fn from(iface: &SystemInterface) -> Self {
        Self {
            iface_type: iface.iface_type.clone(),
            id: iface.netdef_id().map(|i| i.to_string()),
            addresses: iface
                .addresses
                .iter()
                .map(|addr| {
                    (
                        addr.to_ip_prefix(),
                        AddressFlags {
                            flags: addr.flags.clone(),
                        },
                    )
                })
                .collect(),
            nameservers: iface.dns_addresses.clone(),
            search: iface.dns_search.clone(),
            routes: iface.routes.iter().map(Route::from).collect(),
            macaddress: iface.macaddress.clone().filter(|m| !m.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[non_exhaustive]
/// Netplan side of a [MergedInterface].
pub struct NetplanInterfaceState {
    /// Netplan definition ID.
    pub id: String,
    #[serde(rename = "type")]
    pub iface_type: InterfaceType,
    pub dhcp4: bool,
    pub dhcp6: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    /// Addresses in `ip/prefix` form with their options as flags.
    pub addresses: BTreeMap<String, AddressFlags>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macaddress: Option<String>,
}

impl NetplanInterfaceState {
    pub(crate) fn new(netdef_id: &str, netdef: &NetDefinition) -> Self {
        Self {
            id: netdef_id.to_string(),
            iface_type: netdef.iface_type.clone(),
            dhcp4: netdef.dhcp4,
            dhcp6: netdef.dhcp6,
            addresses: netdef
                .addresses
                .iter()
                .map(|addr| {
                    if !is_valid_ip_network(&addr.address) {
                        log::warn!(
                            "Netdef {netdef_id} holds invalid address {addr}"
                        );
                    }
                    (
                        addr.address.clone(),
                        AddressFlags {
                            flags: addr.flags(),
                        },
                    )
                })
                .collect(),
            nameservers: netdef.nameservers.addresses.clone(),
            search: netdef.nameservers.search.clone(),
            // Netdefs built through the API are not normalized yet
            routes: netdef
                .routes
                .iter()
                .map(|rt| {
                    let mut rt = rt.clone();
                    rt.normalize();
                    rt
                })
                .collect(),
            macaddress: netdef.macaddress.clone().filter(|m| !m.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[non_exhaustive]
/// Both sides of one interface placed next to each other, without any
/// comparison done. A side is `None` when the interface is not found there.
pub struct MergedInterface {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_state: Option<SystemInterfaceState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub netplan_state: Option<NetplanInterfaceState>,
}

impl MergedInterface {
    /// The netdef ID used to index the diff report, only available when the
    /// live interface claims a netplan definition.
    pub(crate) fn comparable_netdef_id(&self) -> Option<&str> {
        self.system_state.as_ref().and_then(|s| s.id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[non_exhaustive]
/// State of both the system and netplan in a common representation.
///
/// Interfaces are indexed by the kernel interface name when a live
/// interface claims the netplan definition, otherwise by netdef ID.
/// Example YAML:
/// ```yaml
/// interfaces:
///   eth0:
///     system_state:
///       type: ethernet
///       id: eth0
///       addresses:
///         192.0.2.10/24:
///           flags: [dhcp]
///     netplan_state:
///       id: eth0
///       type: ethernet
///       dhcp4: true
///       dhcp6: false
/// ```
pub struct FullState {
    pub interfaces: BTreeMap<String, MergedInterface>,
}

impl FullState {
    pub(crate) fn new(system: &SystemState, netplan: &NetplanState) -> Self {
        let mut interfaces: BTreeMap<String, MergedInterface> =
            BTreeMap::new();

        for (name, iface) in system.interfaces.iter() {
            interfaces.entry(name.to_string()).or_default().system_state =
                Some(SystemInterfaceState::from(iface));
        }

        let id_to_name = netdef_id_to_name(system);
        for (netdef_id, netdef) in netplan.netdefs.iter() {
            // Index with the interface name if it exists in the system
            let key = id_to_name
                .get(netdef_id.as_str())
                .copied()
                .unwrap_or(netdef_id.as_str());
            interfaces.entry(key.to_string()).or_default().netplan_state =
                Some(NetplanInterfaceState::new(netdef_id, netdef));
        }

        Self { interfaces }
    }
}

/// Map netdef ID to the name of the live interface claiming it.
/// Netdef IDs are unique by netplan design, when two live interfaces claim
/// the same one, the last in name order wins.
pub(crate) fn netdef_id_to_name(system: &SystemState) -> HashMap<&str, &str> {
    let mut id_to_name = HashMap::new();
    for (name, iface) in system.interfaces.iter() {
        if let Some(netdef_id) = iface.netdef_id() {
            if let Some(old_name) = id_to_name.insert(netdef_id, name.as_str())
            {
                log::debug!(
                    "Netdef {netdef_id} is claimed by both {old_name} \
                    and {name}"
                );
            }
        }
    }
    log::debug!("Netdef ID to interface name mapping: {id_to_name:?}");
    id_to_name
}
