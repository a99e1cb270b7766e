// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use crate::{InterfaceType, NetplanState, SystemState};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct MissingInterfaces {
    // Netdef IDs defined in netplan but not found in the system
    pub(crate) system: Vec<String>,
    // Names of system interfaces not defined in netplan
    pub(crate) netplan: Vec<String>,
}

impl MissingInterfaces {
    pub(crate) fn new(system: &SystemState, netplan: &NetplanState) -> Self {
        let system_netdef_ids: HashSet<&str> = system
            .interface_list
            .iter()
            .filter_map(|iface| iface.netdef_id.as_deref())
            .collect();

        // A disconnected wifi netdef is expected to have no interface in the
        // system.
        let mut netplan_only: Vec<String> = netplan
            .netdefs
            .iter()
            .filter(|(netdef_id, netdef)| {
                !system_netdef_ids.contains(netdef_id.as_str())
                    && netdef.iface_type != InterfaceType::Wifi
            })
            .map(|(netdef_id, _)| netdef_id.to_string())
            .collect();

        let mut system_only: Vec<String> = system
            .interface_list
            .iter()
            .filter(|iface| {
                !iface.is_loopback()
                    && !iface
                        .netdef_id
                        .as_deref()
                        .map(|i| netplan.get(i).is_some())
                        .unwrap_or_default()
            })
            .map(|iface| iface.name.to_string())
            .collect();

        netplan_only.sort_unstable();
        system_only.sort_unstable();
        system_only.dedup();

        log::debug!(
            "Interfaces missing in system: {netplan_only:?}, \
            missing in netplan: {system_only:?}"
        );

        Self {
            system: netplan_only,
            netplan: system_only,
        }
    }
}
