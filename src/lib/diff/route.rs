// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashSet};

use super::symmetric_difference;
use crate::ip::{ip_network, is_link_local, strip_prefix_len, AF_INET6};
use crate::{
    AddressFlags, InterfaceDiff, NetplanInterfaceState, Route,
    SystemInterfaceState,
};

const ROUTE_SCOPE_LINK: &str = "link";
const ROUTE_SCOPE_HOST: &str = "host";
const ROUTE_TYPE_LOCAL: &str = "local";
const ROUTE_TYPE_MULTICAST: &str = "multicast";
const ROUTE_PROTOCOLS_DYNAMIC: [&str; 2] = ["dhcp", "ra"];
const ROUTE_TO_DEFAULT: &str = "default";
const IPV6_MULTICAST_NET: &str = "ff00::/8";

/// Remove routes installed automatically by the kernel, DHCP clients or
/// router advertisement, which will never be defined in netplan.
pub(crate) fn filter_system_routes<'a>(
    routes: &'a [Route],
    addresses: &BTreeMap<String, AddressFlags>,
) -> HashSet<&'a Route> {
    let local_networks = local_networks(addresses);
    routes
        .iter()
        .filter(|rt| match auto_route_reason(rt, &local_networks) {
            Some(reason) => {
                log::debug!("Ignoring system route {rt}: {reason}");
                false
            }
            None => true,
        })
        .collect()
}

// Networks and IP addresses owned by the interface.
fn local_networks(
    addresses: &BTreeMap<String, AddressFlags>,
) -> HashSet<String> {
    let mut ret = HashSet::new();
    for addr in addresses.keys() {
        if let Some(network) = ip_network(addr) {
            ret.insert(network);
        }
        ret.insert(strip_prefix_len(addr).to_string());
    }
    ret
}

fn auto_route_reason(
    rt: &Route,
    local_networks: &HashSet<String>,
) -> Option<&'static str> {
    let to = rt.to.as_deref();
    if rt.scope.as_deref() == Some(ROUTE_SCOPE_LINK) {
        Some("link scope")
    } else if rt
        .protocol
        .as_deref()
        .map(|p| ROUTE_PROTOCOLS_DYNAMIC.contains(&p))
        .unwrap_or_default()
    {
        Some("dynamic protocol")
    } else if to
        .map(|to| to != ROUTE_TO_DEFAULT && is_link_local(to))
        .unwrap_or_default()
    {
        Some("link-local destination")
    } else if rt.scope.as_deref() == Some(ROUTE_SCOPE_HOST)
        && rt.route_type.as_deref() == Some(ROUTE_TYPE_LOCAL)
        && to.is_some()
        && to == rt.from_addr.as_deref()
    {
        Some("local host route")
    } else if rt.family == Some(AF_INET6)
        && rt.route_type.as_deref() == Some(ROUTE_TYPE_MULTICAST)
        && to == Some(IPV6_MULTICAST_NET)
    {
        Some("default IPv6 multicast route")
    } else if to.map(|to| local_networks.contains(to)).unwrap_or_default() {
        Some("local network route")
    } else {
        None
    }
}

pub(super) fn analyze_routes(
    system: &SystemInterfaceState,
    netplan: &NetplanInterfaceState,
    iface_diff: &mut InterfaceDiff,
) {
    let netplan_routes: HashSet<&Route> = netplan.routes.iter().collect();
    let system_routes = filter_system_routes(&system.routes, &system.addresses);

    let (netplan_only, system_only) =
        symmetric_difference(&netplan_routes, &system_routes);
    iface_diff.system_state.missing_routes =
        netplan_only.into_iter().cloned().collect();
    iface_diff.netplan_state.missing_routes =
        system_only.into_iter().cloned().collect();
}
