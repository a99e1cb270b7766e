// SPDX-License-Identifier: Apache-2.0

use crate::diff::gen_iface_diff;
use crate::missing::MissingInterfaces;
use crate::{DiffReport, FullState, NetplanState, SystemState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
/// Compare the running system network state against netplan configuration.
///
/// Configuration automatically set by the system at runtime, for example
/// addresses and name servers obtained via DHCP or routes installed by the
/// kernel, is not reported as difference.
///
/// Example:
/// ```
/// use netplan_state::{NetplanDiffState, NetplanState, SystemState};
///
/// let system = SystemState::new_from_yaml(
///     r"
/// eth0:
///   type: ethernet
///   id: eth0
///   addresses:
///   - 192.0.2.10:
///       prefix: 24
///       flags: [dhcp]
/// ",
/// )
/// .unwrap();
/// let netplan = NetplanState::new_from_yaml(
///     r"
/// network:
///   ethernets:
///     eth0:
///       dhcp4: true
/// ",
/// )
/// .unwrap();
/// let diff = NetplanDiffState::new(&system, &netplan).get_diff(None);
/// assert!(diff.is_empty());
/// ```
pub struct NetplanDiffState<'a> {
    system: &'a SystemState,
    netplan: &'a NetplanState,
}

impl<'a> NetplanDiffState<'a> {
    pub fn new(system: &'a SystemState, netplan: &'a NetplanState) -> Self {
        Self { system, netplan }
    }

    /// Both sides of every interface without comparing or filtering
    /// anything.
    pub fn get_full_state(&self) -> FullState {
        FullState::new(self.system, self.netplan)
    }

    /// Generate the differences between system and netplan.
    ///
    /// When `iface_name` is defined, only the interface with that kernel
    /// interface name is compared. The missing interface lists always cover
    /// all interfaces.
    pub fn get_diff(&self, iface_name: Option<&str>) -> DiffReport {
        let full_state = self.get_full_state();
        let mut report = DiffReport::new();

        for (name, merged) in full_state.interfaces.iter() {
            if let Some(iface_name) = iface_name {
                if name != iface_name {
                    continue;
                }
            }
            // Interfaces without netplan ID cannot be matched, they are
            // counted in the missing interfaces already.
            let netdef_id = match merged.comparable_netdef_id() {
                Some(i) => i,
                None => {
                    log::debug!(
                        "Skipping interface {name} with no netplan \
                        definition attached"
                    );
                    continue;
                }
            };
            report
                .interfaces
                .insert(netdef_id.to_string(), gen_iface_diff(name, merged));
        }

        if let Some(iface_name) = iface_name {
            if report.interfaces.is_empty() {
                log::info!(
                    "Interface {iface_name} not found in the system or not \
                    managed by netplan"
                );
            }
        }

        let missing = MissingInterfaces::new(self.system, self.netplan);
        report.missing_interfaces_system = missing.system;
        report.missing_interfaces_netplan = missing.netplan;
        report
    }
}
