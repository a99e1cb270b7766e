// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

pub(crate) const LOOPBACK_IFACE_NAME: &str = "lo";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[non_exhaustive]
/// Device type of an interface.
///
/// Deserialize from both the netplan section names (`ethernets`, `wifis`,
/// ...) and the singular names reported for live interfaces (`ethernet`,
/// `wifi`, ...). Always serialize to the singular name.
pub enum InterfaceType {
    Ethernet,
    Wifi,
    Bridge,
    Bond,
    Vlan,
    Tunnel,
    Vrf,
    Modem,
    Dummy,
    Veth,
    NmDevice,
    Loopback,
    Unknown,
    Other(String),
}

impl Default for InterfaceType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl From<&str> for InterfaceType {
    fn from(s: &str) -> Self {
        match s {
            "ethernets" | "ethernet" => InterfaceType::Ethernet,
            "wifis" | "wifi" => InterfaceType::Wifi,
            "bridges" | "bridge" => InterfaceType::Bridge,
            "bonds" | "bond" => InterfaceType::Bond,
            "vlans" | "vlan" => InterfaceType::Vlan,
            "tunnels" | "tunnel" => InterfaceType::Tunnel,
            "vrfs" | "vrf" => InterfaceType::Vrf,
            "modems" | "modem" => InterfaceType::Modem,
            "dummy-devices" | "dummy" => InterfaceType::Dummy,
            "virtual-ethernets" | "veth" => InterfaceType::Veth,
            "nm-devices" | "nm-device" => InterfaceType::NmDevice,
            "loopback" => InterfaceType::Loopback,
            "unknown" | "" => InterfaceType::Unknown,
            _ => InterfaceType::Other(s.to_string()),
        }
    }
}

impl From<String> for InterfaceType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<InterfaceType> for String {
    fn from(v: InterfaceType) -> String {
        v.to_string()
    }
}

impl std::fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Ethernet => "ethernet",
                Self::Wifi => "wifi",
                Self::Bridge => "bridge",
                Self::Bond => "bond",
                Self::Vlan => "vlan",
                Self::Tunnel => "tunnel",
                Self::Vrf => "vrf",
                Self::Modem => "modem",
                Self::Dummy => "dummy",
                Self::Veth => "veth",
                Self::NmDevice => "nm-device",
                Self::Loopback => "loopback",
                Self::Unknown => "unknown",
                Self::Other(s) => s.as_str(),
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
/// Identity of a network interface found in the running system.
pub struct InterfaceIdentity {
    /// Kernel interface name.
    pub name: String,
    /// Identifier of the netplan definition this interface was created
    /// from, if any.
    pub netdef_id: Option<String>,
    pub iface_type: InterfaceType,
}

impl InterfaceIdentity {
    pub fn new(
        name: &str,
        netdef_id: Option<&str>,
        iface_type: InterfaceType,
    ) -> Self {
        Self {
            name: name.to_string(),
            netdef_id: netdef_id.map(|i| i.to_string()),
            iface_type,
        }
    }

    pub(crate) fn is_loopback(&self) -> bool {
        self.name == LOOPBACK_IFACE_NAME
    }
}
