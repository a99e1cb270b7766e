// SPDX-License-Identifier: Apache-2.0

use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

use serde::{de, de::Visitor, Deserialize, Deserializer, Serialize};

pub(crate) const AF_INET: u8 = 2;
pub(crate) const AF_INET6: u8 = 10;
const IPV4_ADDR_LEN: u8 = 32;
const IPV6_ADDR_LEN: u8 = 128;

const ADDR_FLAG_DHCP: &str = "dhcp";
const ADDR_FLAG_LINK: &str = "link";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
/// One IP address assigned to a live interface.
///
/// Deserialize from the single-key map used by `netplan status`:
/// ```yaml
/// - 192.0.2.10:
///     prefix: 24
///     flags: [dhcp]
/// ```
pub struct AddressRecord {
    /// IP address without prefix length.
    pub ip: String,
    pub prefix: u8,
    /// Flags reported for this address, e.g. `dhcp`, `link`, `ra`,
    /// `label: <label>`.
    pub flags: Vec<String>,
}

impl AddressRecord {
    pub fn new(ip: &str, prefix: u8, flags: &[&str]) -> Self {
        Self {
            ip: ip.to_string(),
            prefix,
            flags: flags.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// The `ip/prefix` form used as comparison key against declared
    /// addresses.
    pub fn to_ip_prefix(&self) -> String {
        format!("{}/{}", self.ip, self.prefix)
    }
}

fn has_flag(flags: &[String], flag: &str) -> bool {
    flags.iter().any(|f| f == flag)
}

#[derive(Deserialize)]
struct AddressRecordInfo {
    #[serde(
        default,
        deserialize_with = "crate::deserializer::option_integer_or_string"
    )]
    prefix: Option<u8>,
    #[serde(default)]
    flags: Vec<String>,
}

impl<'de> Deserialize<'de> for AddressRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AddressRecordVisitor;

        impl<'de> Visitor<'de> for AddressRecordVisitor {
            type Value = AddressRecord;

            fn expecting(
                &self,
                formatter: &mut std::fmt::Formatter,
            ) -> std::fmt::Result {
                formatter.write_str("map of IP address to prefix and flags")
            }

            fn visit_map<M>(self, mut map: M) -> Result<AddressRecord, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                let (ip, info) = map
                    .next_entry::<String, AddressRecordInfo>()?
                    .ok_or_else(|| {
                        de::Error::custom("empty IP address entry")
                    })?;
                if map.next_key::<String>()?.is_some() {
                    return Err(de::Error::custom(format!(
                        "IP address entry {ip} holds more than one address"
                    )));
                }
                let prefix = info.prefix.unwrap_or(if is_ipv6_addr(&ip) {
                    IPV6_ADDR_LEN
                } else {
                    IPV4_ADDR_LEN
                });
                Ok(AddressRecord {
                    ip,
                    prefix,
                    flags: info.flags,
                })
            }
        }

        deserializer.deserialize_map(AddressRecordVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
/// IP address declared in netplan.
///
/// Deserialize from either the plain `ip/prefix` string or the map form
/// carrying address options:
/// ```yaml
/// addresses:
///   - 192.0.2.1/24
///   - 192.0.2.2/24:
///       label: myip
///       lifetime: forever
/// ```
pub struct NetplanAddress {
    /// Address in `ip/prefix` form.
    pub address: String,
    pub label: Option<String>,
    pub lifetime: Option<String>,
}

impl NetplanAddress {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            ..Default::default()
        }
    }

    /// Address options rendered the same way the system side reports its
    /// address flags.
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if let Some(label) = self.label.as_deref() {
            flags.push(format!("label: {label}"));
        }
        if let Some(lifetime) = self.lifetime.as_deref() {
            flags.push(format!("lifetime: {lifetime}"));
        }
        flags
    }
}

impl std::fmt::Display for NetplanAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.address)
    }
}

#[derive(Deserialize, Default)]
struct NetplanAddressOptions {
    #[serde(default)]
    label: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::deserializer::option_string_or_integer"
    )]
    lifetime: Option<String>,
}

impl<'de> Deserialize<'de> for NetplanAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NetplanAddressVisitor;

        impl<'de> Visitor<'de> for NetplanAddressVisitor {
            type Value = NetplanAddress;

            fn expecting(
                &self,
                formatter: &mut std::fmt::Formatter,
            ) -> std::fmt::Result {
                formatter.write_str("IP address string or map")
            }

            fn visit_str<E>(self, value: &str) -> Result<NetplanAddress, E>
            where
                E: de::Error,
            {
                Ok(NetplanAddress::new(value))
            }

            fn visit_map<M>(
                self,
                mut map: M,
            ) -> Result<NetplanAddress, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                let (address, opts) = map
                    .next_entry::<String, Option<NetplanAddressOptions>>()?
                    .ok_or_else(|| de::Error::custom("empty address entry"))?;
                let opts = opts.unwrap_or_default();
                Ok(NetplanAddress {
                    address,
                    label: opts.label,
                    lifetime: opts.lifetime,
                })
            }
        }

        deserializer.deserialize_any(NetplanAddressVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[non_exhaustive]
/// Per address data shown in the merged state.
pub struct AddressFlags {
    pub flags: Vec<String>,
}

impl AddressFlags {
    /// Address obtained from a DHCP server.
    pub fn is_dhcp(&self) -> bool {
        has_flag(&self.flags, ADDR_FLAG_DHCP)
    }

    /// Link-local address assigned by the kernel.
    pub fn is_link(&self) -> bool {
        has_flag(&self.flags, ADDR_FLAG_LINK)
    }
}

pub(crate) fn is_ipv6_addr(addr: &str) -> bool {
    addr.contains(':')
}

/// Address family number of given address or network string.
pub(crate) fn addr_family(addr: &str) -> u8 {
    if is_ipv6_addr(addr) {
        AF_INET6
    } else {
        AF_INET
    }
}

// Copy from Rust official std::net::Ipv6Addr::is_unicast_link_local() which
// is experimental.
pub(crate) fn is_ipv6_unicast_link_local(ip: &Ipv6Addr) -> bool {
    (ip.segments()[0] & 0xffc0) == 0xfe80
}

/// Whether the address part of `ip` or `ip/prefix` is a link-local address.
/// Unparsable strings are not link-local.
pub(crate) fn is_link_local(addr: &str) -> bool {
    match IpAddr::from_str(strip_prefix_len(addr)) {
        Ok(IpAddr::V4(ip)) => ip.is_link_local(),
        Ok(IpAddr::V6(ip)) => is_ipv6_unicast_link_local(&ip),
        Err(_) => false,
    }
}

pub(crate) fn strip_prefix_len(addr: &str) -> &str {
    addr.split('/').next().unwrap_or(addr)
}

pub(crate) fn is_valid_ip_network(addr: &str) -> bool {
    ipnet::IpNet::from_str(addr).is_ok()
}

/// Network of an `ip/prefix` address, e.g. `192.0.2.0/24` for
/// `192.0.2.10/24`.
pub(crate) fn ip_network(addr: &str) -> Option<String> {
    match ipnet::IpNet::from_str(addr) {
        Ok(ip_net) => Some(ip_net.trunc().to_string()),
        Err(e) => {
            log::debug!("Ignoring invalid IP network {addr}: {e}");
            None
        }
    }
}
