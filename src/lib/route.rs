// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::ip::addr_family;

// Mapped in /etc/iproute2/rt_tables
const ROUTE_TABLE_DEFAULT: u32 = 253;
const ROUTE_TABLE_MAIN: u32 = 254;
const ROUTE_TABLE_LOCAL: u32 = 255;
const ROUTE_TABLE_UNKNOWN: u32 = 0;

const ROUTE_TYPE_DEFAULT: &str = "unicast";
const ROUTE_SCOPE_DEFAULT: &str = "global";

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[non_exhaustive]
/// Normalized routing table entry used by both the netplan side and the
/// system side.
///
/// Two routes are equal only when every field is equal, an unset field only
/// equals another unset field. Routes built from netplan or from the system
/// are normalized first, which sets `type` to `unicast`, `scope` to `global`
/// and `table` to the main table when not defined. Unset fields are omitted
/// when serializing.
/// Example YAML of a netplan route:
/// ```yaml
/// to: default
/// via: 192.0.2.1
/// metric: 100
/// family: 2
/// table: 254
/// ```
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Destination network, address or `default`.
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Gateway address.
    pub via: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "from")]
    /// Preferred source address.
    /// Serialize and deserialize to/from `from`.
    pub from_addr: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "crate::deserializer::option_integer_or_string"
    )]
    pub metric: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Route scope, e.g. `global`, `link`, `host`.
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    /// Route type, e.g. `unicast`, `local`, `multicast`.
    /// Serialize and deserialize to/from `type`.
    pub route_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Route protocol, e.g. `kernel`, `static`, `dhcp`, `ra`.
    pub protocol: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "crate::deserializer::option_integer_or_string"
    )]
    /// Address family: 2 for IPv4, 10 for IPv6.
    pub family: Option<u8>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "crate::deserializer::option_integer_or_string"
    )]
    /// Numeric routing table ID.
    pub table: Option<u32>,
}

impl Route {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the netplan defaults to properties not defined, so a route
    /// only stating `to` and `via` equals the same route reported by the
    /// system.
    pub(crate) fn normalize(&mut self) {
        self.fill_family();
        if self.route_type.is_none() {
            self.route_type = Some(ROUTE_TYPE_DEFAULT.to_string());
        }
        if self.scope.is_none() {
            self.scope = Some(ROUTE_SCOPE_DEFAULT.to_string());
        }
        if self.table.is_none() {
            self.table = Some(ROUTE_TABLE_MAIN);
        }
    }

    /// Fill the address family from the destination or gateway when not
    /// defined, like netplan does when parsing a route.
    pub(crate) fn fill_family(&mut self) {
        if self.family.is_none() {
            self.family = self
                .to
                .as_deref()
                .filter(|to| *to != "default")
                .or(self.via.as_deref())
                .map(addr_family);
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut props = Vec::new();
        if let Some(v) = self.to.as_ref() {
            props.push(format!("to: {v}"));
        }
        if let Some(v) = self.via.as_ref() {
            props.push(format!("via: {v}"));
        }
        if let Some(v) = self.from_addr.as_ref() {
            props.push(format!("from: {v}"));
        }
        if let Some(v) = self.metric.as_ref() {
            props.push(format!("metric: {v}"));
        }
        if let Some(v) = self.scope.as_ref() {
            props.push(format!("scope: {v}"));
        }
        if let Some(v) = self.route_type.as_ref() {
            props.push(format!("type: {v}"));
        }
        if let Some(v) = self.protocol.as_ref() {
            props.push(format!("protocol: {v}"));
        }
        if let Some(v) = self.family.as_ref() {
            props.push(format!("family: {v}"));
        }
        if let Some(v) = self.table.as_ref() {
            props.push(format!("table: {v}"));
        }

        write!(f, "{}", props.join(" "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
/// Route as reported by the running system, before normalization.
pub struct SystemRoute {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub via: Option<String>,
    #[serde(default, rename = "from")]
    pub from_addr: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::deserializer::option_integer_or_string"
    )]
    pub metric: Option<u32>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default, rename = "type")]
    pub route_type: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::deserializer::option_integer_or_string"
    )]
    pub family: Option<u8>,
    #[serde(
        default,
        deserialize_with = "crate::deserializer::option_string_or_integer"
    )]
    /// Routing table name (`main`, `local`, ...) or number.
    pub table: Option<String>,
}

impl SystemRoute {
    /// Convert to the normalized [Route] shape used by netplan.
    /// Empty strings and zero numbers are treated as unset, symbolic table
    /// names are resolved to their numeric ID.
    pub fn to_netplan_route(&self) -> Route {
        let mut route = Route {
            to: non_empty(&self.to),
            via: non_empty(&self.via),
            from_addr: non_empty(&self.from_addr),
            metric: self.metric.filter(|m| *m != 0),
            scope: non_empty(&self.scope),
            route_type: non_empty(&self.route_type),
            protocol: non_empty(&self.protocol),
            family: self.family.filter(|f| *f != 0),
            table: non_empty(&self.table)
                .map(|t| default_tables_name_to_number(t.as_str())),
        };
        route.normalize();
        route
    }
}

impl From<&SystemRoute> for Route {
    fn from(system_route: &SystemRoute) -> Self {
        system_route.to_netplan_route()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Translate routing table name into table ID. Numeric strings are parsed,
/// unknown names resolve to 0.
pub fn default_tables_name_to_number(name: &str) -> u32 {
    match name {
        "default" => ROUTE_TABLE_DEFAULT,
        "main" => ROUTE_TABLE_MAIN,
        "local" => ROUTE_TABLE_LOCAL,
        _ => match name.parse::<u32>() {
            Ok(table) => table,
            Err(e) => {
                log::debug!(
                    "Unknown route table name {name}: {e}, \
                    using table ID {ROUTE_TABLE_UNKNOWN}"
                );
                ROUTE_TABLE_UNKNOWN
            }
        },
    }
}
