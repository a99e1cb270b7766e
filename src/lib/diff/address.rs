// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashSet};

use super::symmetric_difference;
use crate::ip::is_ipv6_addr;
use crate::{
    AddressFlags, InterfaceDiff, NetplanInterfaceState, SystemInterfaceState,
};

/// Addresses which are neither obtained from DHCP nor link-local.
pub(crate) fn static_addresses(
    addresses: &BTreeMap<String, AddressFlags>,
) -> HashSet<&str> {
    addresses
        .iter()
        .filter(|(addr, flags)| {
            if flags.is_dhcp() || flags.is_link() {
                log::debug!(
                    "Ignoring dynamic address {addr} with flags {:?}",
                    flags.flags
                );
                false
            } else {
                true
            }
        })
        .map(|(addr, _)| addr.as_str())
        .collect()
}

/// Return whether `(DHCPv4, DHCPv6)` address is found in the system.
pub(crate) fn dhcp_address_obtained(
    addresses: &BTreeMap<String, AddressFlags>,
) -> (bool, bool) {
    let mut dhcp4 = false;
    let mut dhcp6 = false;
    for addr in addresses
        .iter()
        .filter(|(_, flags)| flags.is_dhcp())
        .map(|(addr, _)| addr)
    {
        if is_ipv6_addr(addr) {
            dhcp6 = true;
        } else {
            dhcp4 = true;
        }
    }
    (dhcp4, dhcp6)
}

// We do count the absence of addresses that should be assigned by DHCP as a
// difference.
pub(super) fn analyze_addresses(
    system: &SystemInterfaceState,
    netplan: &NetplanInterfaceState,
    iface_diff: &mut InterfaceDiff,
) {
    let netplan_addrs: HashSet<&str> =
        netplan.addresses.keys().map(|a| a.as_str()).collect();
    let system_addrs = static_addresses(&system.addresses);

    let (dhcp4_obtained, dhcp6_obtained) =
        dhcp_address_obtained(&system.addresses);
    iface_diff.system_state.missing_dhcp4_address =
        netplan.dhcp4 && !dhcp4_obtained;
    iface_diff.system_state.missing_dhcp6_address =
        netplan.dhcp6 && !dhcp6_obtained;

    let (netplan_only, system_only) =
        symmetric_difference(&netplan_addrs, &system_addrs);
    iface_diff.system_state.missing_addresses =
        netplan_only.into_iter().map(|a| a.to_string()).collect();
    iface_diff.netplan_state.missing_addresses =
        system_only.into_iter().map(|a| a.to_string()).collect();
}
