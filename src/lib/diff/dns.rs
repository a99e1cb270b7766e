// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use super::symmetric_difference;
use crate::ip::is_ipv6_addr;
use crate::{
    InterfaceDiff, NetplanInterfaceState, Route, SystemInterfaceState,
};

const ROUTE_PROTOCOL_RA: &str = "ra";

/// Remove name servers equal to the gateway of a router advertisement route.
///
/// This is a heuristic: the system does not tell whether a name server was
/// learned from router advertisement, a static name server equal to the RA
/// gateway is removed as well.
pub(crate) fn filter_ra_nameservers<'a>(
    nameservers: HashSet<&'a str>,
    system_routes: &[Route],
) -> HashSet<&'a str> {
    let ra_gateways: HashSet<&str> = system_routes
        .iter()
        .filter(|rt| rt.protocol.as_deref() == Some(ROUTE_PROTOCOL_RA))
        .filter_map(|rt| rt.via.as_deref())
        .collect();
    nameservers
        .into_iter()
        .filter(|ns| {
            if ra_gateways.contains(ns) {
                log::debug!("Ignoring name server {ns} learned from RA");
                false
            } else {
                true
            }
        })
        .collect()
}

/// When netplan enables DHCP without defining any name server, assume the
/// name servers of the matching address family come from DHCP.
pub(crate) fn filter_dhcp_nameservers<'a>(
    nameservers: HashSet<&'a str>,
    netplan_nameservers: &[String],
    dhcp4: bool,
    dhcp6: bool,
) -> HashSet<&'a str> {
    if !netplan_nameservers.is_empty() {
        return nameservers;
    }
    nameservers
        .into_iter()
        .filter(|ns| {
            let is_ipv6 = is_ipv6_addr(ns);
            if (dhcp4 && !is_ipv6) || (dhcp6 && is_ipv6) {
                log::debug!("Ignoring name server {ns} assumed from DHCP");
                false
            } else {
                true
            }
        })
        .collect()
}

/// When netplan enables DHCP without defining any search domain, assume all
/// search domains come from DHCP.
pub(crate) fn filter_dhcp_search_domains<'a>(
    search_domains: HashSet<&'a str>,
    netplan_search_domains: &[String],
    dhcp4: bool,
    dhcp6: bool,
) -> HashSet<&'a str> {
    if netplan_search_domains.is_empty()
        && (dhcp4 || dhcp6)
        && !search_domains.is_empty()
    {
        log::debug!(
            "Ignoring search domains {search_domains:?} assumed from DHCP"
        );
        HashSet::new()
    } else {
        search_domains
    }
}

pub(super) fn analyze_nameservers(
    system: &SystemInterfaceState,
    netplan: &NetplanInterfaceState,
    iface_diff: &mut InterfaceDiff,
) {
    let netplan_nameservers: HashSet<&str> =
        netplan.nameservers.iter().map(|n| n.as_str()).collect();
    let system_nameservers: HashSet<&str> =
        system.nameservers.iter().map(|n| n.as_str()).collect();

    let system_nameservers =
        filter_ra_nameservers(system_nameservers, &system.routes);
    let system_nameservers = filter_dhcp_nameservers(
        system_nameservers,
        &netplan.nameservers,
        netplan.dhcp4,
        netplan.dhcp6,
    );

    let (netplan_only, system_only) =
        symmetric_difference(&netplan_nameservers, &system_nameservers);
    iface_diff.system_state.missing_nameservers =
        netplan_only.into_iter().map(|n| n.to_string()).collect();
    iface_diff.netplan_state.missing_nameservers =
        system_only.into_iter().map(|n| n.to_string()).collect();
}

pub(super) fn analyze_search_domains(
    system: &SystemInterfaceState,
    netplan: &NetplanInterfaceState,
    iface_diff: &mut InterfaceDiff,
) {
    let netplan_search: HashSet<&str> =
        netplan.search.iter().map(|s| s.as_str()).collect();
    let system_search: HashSet<&str> =
        system.search.iter().map(|s| s.as_str()).collect();

    let system_search = filter_dhcp_search_domains(
        system_search,
        &netplan.search,
        netplan.dhcp4,
        netplan.dhcp6,
    );

    let (netplan_only, system_only) =
        symmetric_difference(&netplan_search, &system_search);
    iface_diff.system_state.missing_search_domains =
        netplan_only.into_iter().map(|s| s.to_string()).collect();
    iface_diff.netplan_state.missing_search_domains =
        system_only.into_iter().map(|s| s.to_string()).collect();
}
