// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::{
    InterfaceType, NameServiceConfig, NetplanAddress, NetplanStateError, Route,
};

const NETWORK_KEY: &str = "network";

const NETPLAN_SECTIONS: [&str; 11] = [
    "ethernets",
    "wifis",
    "bridges",
    "bonds",
    "vlans",
    "tunnels",
    "vrfs",
    "modems",
    "dummy-devices",
    "virtual-ethernets",
    "nm-devices",
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[non_exhaustive]
/// A netplan network definition (netdef). Properties not related to the
/// state comparison are ignored when deserializing.
pub struct NetDefinition {
    #[serde(default, rename = "type")]
    pub iface_type: InterfaceType,
    #[serde(
        default,
        deserialize_with = "crate::deserializer::bool_or_string"
    )]
    /// Whether DHCPv4 is enabled.
    pub dhcp4: bool,
    #[serde(
        default,
        deserialize_with = "crate::deserializer::bool_or_string"
    )]
    /// Whether DHCPv6 is enabled.
    pub dhcp6: bool,
    #[serde(default)]
    pub addresses: Vec<NetplanAddress>,
    #[serde(default)]
    pub nameservers: NameServiceConfig,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub macaddress: Option<String>,
}

impl NetDefinition {
    pub fn new(iface_type: InterfaceType) -> Self {
        Self {
            iface_type,
            ..Default::default()
        }
    }

    fn normalize_routes(&mut self) {
        for route in self.routes.iter_mut() {
            route.normalize();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
/// Netplan configuration indexed by netdef ID.
///
/// Deserialize from either the netplan YAML document:
/// ```yaml
/// network:
///   version: 2
///   ethernets:
///     eth0:
///       dhcp4: true
///   wifis:
///     wlan0:
///       dhcp4: true
/// ```
/// or a map of netdef ID to [NetDefinition] holding its own `type`:
/// ```yaml
/// eth0:
///   type: ethernets
///   dhcp4: true
/// ```
pub struct NetplanState {
    pub netdefs: BTreeMap<String, NetDefinition>,
}

impl NetplanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_from_yaml(
        net_state: &str,
    ) -> Result<Self, NetplanStateError> {
        Ok(serde_yaml::from_str(net_state)?)
    }

    pub fn new_from_json(
        net_state: &str,
    ) -> Result<Self, NetplanStateError> {
        Ok(serde_json::from_str(net_state)?)
    }

    pub fn append_netdef(&mut self, netdef_id: &str, netdef: NetDefinition) {
        self.netdefs.insert(netdef_id.to_string(), netdef);
    }

    pub fn get(&self, netdef_id: &str) -> Option<&NetDefinition> {
        self.netdefs.get(netdef_id)
    }
}

impl<'de> Deserialize<'de> for NetplanState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut ret = NetplanState::new();
        let mut v = serde_json::Value::deserialize(deserializer)?;
        if v.is_null() {
            return Ok(ret);
        }
        let v = match v.as_object_mut() {
            Some(v) => v,
            None => {
                return Err(serde::de::Error::custom(
                    "Expecting netplan configuration as a map",
                ));
            }
        };
        if let Some(network) = v.remove(NETWORK_KEY) {
            let mut network = match network {
                serde_json::Value::Object(n) => n,
                serde_json::Value::Null => return Ok(ret),
                _ => {
                    return Err(serde::de::Error::custom(
                        "Expecting 'network' as a map",
                    ));
                }
            };
            for section in NETPLAN_SECTIONS {
                if let Some(netdefs_v) = network.remove(section) {
                    for (netdef_id, mut netdef) in
                        parse_netdefs::<D::Error>(section, netdefs_v)?
                    {
                        netdef.iface_type = InterfaceType::from(section);
                        ret.netdefs.insert(netdef_id, netdef);
                    }
                }
            }
        } else {
            let netdefs_v = serde_json::Value::Object(std::mem::take(v));
            ret.netdefs = parse_netdefs::<D::Error>("netdefs", netdefs_v)?;
        }
        for netdef in ret.netdefs.values_mut() {
            netdef.normalize_routes();
        }
        Ok(ret)
    }
}

fn parse_netdefs<E>(
    section: &str,
    v: serde_json::Value,
) -> Result<BTreeMap<String, NetDefinition>, E>
where
    E: serde::de::Error,
{
    let mut ret = BTreeMap::new();
    let netdefs_v = match v {
        serde_json::Value::Object(n) => n,
        serde_json::Value::Null => return Ok(ret),
        _ => {
            return Err(E::custom(format!(
                "Expecting '{section}' as a map of netdef ID to definition"
            )));
        }
    };
    for (netdef_id, netdef_v) in netdefs_v {
        let netdef = if netdef_v.is_null() {
            NetDefinition::default()
        } else {
            NetDefinition::deserialize(netdef_v).map_err(|e| {
                E::custom(format!("Invalid netdef {netdef_id}: {e}"))
            })?
        };
        ret.insert(netdef_id, netdef);
    }
    Ok(ret)
}
