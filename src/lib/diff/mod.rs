// SPDX-License-Identifier: Apache-2.0

pub(crate) mod address;
pub(crate) mod dns;
pub(crate) mod route;

use std::collections::HashSet;
use std::hash::Hash;

use crate::{
    InterfaceDiff, MergedInterface, NetplanInterfaceState,
    SystemInterfaceState,
};

/// Compare both sides of an interface.
///
/// Configuration automatically set in the system (DHCP addresses, router
/// advertisement DNS, kernel routes and etc) is filtered out by heuristics
/// before comparing as netplan will never define it.
pub(crate) fn gen_iface_diff(
    name: &str,
    merged: &MergedInterface,
) -> InterfaceDiff {
    let default_system = SystemInterfaceState::default();
    let default_netplan = NetplanInterfaceState::default();
    let system = merged.system_state.as_ref().unwrap_or(&default_system);
    let netplan = merged.netplan_state.as_ref().unwrap_or(&default_netplan);

    let mut iface_diff = InterfaceDiff::new(name);
    address::analyze_addresses(system, netplan, &mut iface_diff);
    dns::analyze_nameservers(system, netplan, &mut iface_diff);
    dns::analyze_search_domains(system, netplan, &mut iface_diff);
    route::analyze_routes(system, netplan, &mut iface_diff);
    analyze_macaddress(system, netplan, &mut iface_diff);
    iface_diff
}

// Only report when both sides define a MAC address. Each side holds the MAC
// address of the other side as missing.
fn analyze_macaddress(
    system: &SystemInterfaceState,
    netplan: &NetplanInterfaceState,
    iface_diff: &mut InterfaceDiff,
) {
    if let (Some(system_mac), Some(netplan_mac)) =
        (system.macaddress.as_ref(), netplan.macaddress.as_ref())
    {
        if system_mac != netplan_mac {
            iface_diff.system_state.missing_macaddress =
                Some(netplan_mac.to_string());
            iface_diff.netplan_state.missing_macaddress =
                Some(system_mac.to_string());
        }
    }
}

/// Return sorted `(present_only_in_netplan, present_only_in_system)`.
pub(crate) fn symmetric_difference<T>(
    netplan: &HashSet<T>,
    system: &HashSet<T>,
) -> (Vec<T>, Vec<T>)
where
    T: Hash + Eq + Ord + Clone,
{
    let mut netplan_only: Vec<T> =
        netplan.difference(system).cloned().collect();
    let mut system_only: Vec<T> =
        system.difference(netplan).cloned().collect();
    netplan_only.sort_unstable();
    system_only.sort_unstable();
    (netplan_only, system_only)
}
