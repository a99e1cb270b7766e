// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::{
    AddressRecord, InterfaceIdentity, InterfaceType, NetplanStateError,
    SystemRoute,
};

const GLOBAL_STATE_KEY: &str = "netplan-global-state";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[non_exhaustive]
/// Live configuration of one interface. Example YAML:
/// ```yaml
/// type: ethernet
/// id: eth0
/// macaddress: 52:54:00:12:34:56
/// addresses:
/// - 192.0.2.10:
///     prefix: 24
///     flags: [dhcp]
/// dns_addresses: [192.0.2.1]
/// dns_search: [example.org]
/// routes:
/// - to: default
///   via: 192.0.2.1
///   family: 2
///   table: main
/// ```
pub struct SystemInterface {
    #[serde(default, rename = "type")]
    pub iface_type: InterfaceType,
    #[serde(default, rename = "id")]
    /// The netplan definition ID this interface was created from.
    /// Deserialize from `id`.
    pub netdef_id: Option<String>,
    #[serde(default)]
    pub addresses: Vec<AddressRecord>,
    #[serde(default)]
    pub dns_addresses: Vec<String>,
    #[serde(default)]
    pub dns_search: Vec<String>,
    #[serde(default)]
    pub routes: Vec<SystemRoute>,
    #[serde(default)]
    pub macaddress: Option<String>,
}

impl SystemInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Netplan definition ID, empty string is treated as not defined.
    pub fn netdef_id(&self) -> Option<&str> {
        self.netdef_id.as_deref().filter(|i| !i.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
/// Snapshot of the running system network state.
///
/// Deserialize from the `netplan status` JSON layout: a map of interface
/// name to [SystemInterface]. The `netplan-global-state` entry is ignored
/// and [SystemState::interface_list] is generated from the interfaces.
pub struct SystemState {
    /// Interfaces indexed by kernel interface name.
    pub interfaces: BTreeMap<String, SystemInterface>,
    /// Identity of every interface found in the system, used for searching
    /// interfaces missing in netplan.
    pub interface_list: Vec<InterfaceIdentity>,
}

impl SystemState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_from_json(
        net_state: &str,
    ) -> Result<Self, NetplanStateError> {
        Ok(serde_json::from_str(net_state)?)
    }

    pub fn new_from_yaml(
        net_state: &str,
    ) -> Result<Self, NetplanStateError> {
        Ok(serde_yaml::from_str(net_state)?)
    }

    /// Insert interface and its identity.
    pub fn append_interface(&mut self, name: &str, iface: SystemInterface) {
        self.interface_list.push(InterfaceIdentity::new(
            name,
            iface.netdef_id(),
            iface.iface_type.clone(),
        ));
        self.interfaces.insert(name.to_string(), iface);
    }
}

impl<'de> Deserialize<'de> for SystemState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut ret = SystemState::new();
        let v = serde_json::Value::deserialize(deserializer)?;
        let v = match v {
            serde_json::Value::Object(v) => v,
            serde_json::Value::Null => return Ok(ret),
            _ => {
                return Err(serde::de::Error::custom(
                    "Expecting a map of interface name to interface state",
                ));
            }
        };
        for (name, iface_v) in v {
            if name == GLOBAL_STATE_KEY {
                continue;
            }
            let iface = SystemInterface::deserialize(iface_v).map_err(|e| {
                serde::de::Error::custom(format!(
                    "Invalid state of interface {name}: {e}"
                ))
            })?;
            ret.append_interface(name.as_str(), iface);
        }
        Ok(ret)
    }
}
