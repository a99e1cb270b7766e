// SPDX-License-Identifier: Apache-2.0

//! Compare the network state of the running system against the netplan
//! configuration.
//!
//! Both sides are loaded as snapshots, [SystemState] for the live system and
//! [NetplanState] for the netplan configuration, then handed to
//! [NetplanDiffState] which generates a [DiffReport]. Configuration set
//! dynamically at runtime (DHCP and router advertisement addresses, name
//! servers and routes, kernel routes) is not considered as difference.
//!
//! ```
//! use netplan_state::{NetplanDiffState, NetplanState, SystemState};
//!
//! let system = SystemState::new_from_yaml(
//!     r"
//! eth0:
//!   type: ethernet
//!   id: eth0
//! ",
//! )
//! .unwrap();
//! let netplan = NetplanState::new_from_yaml(
//!     r"
//! network:
//!   ethernets:
//!     eth0:
//!       addresses: [192.168.0.1/24]
//! ",
//! )
//! .unwrap();
//!
//! let diff = NetplanDiffState::new(&system, &netplan).get_diff(None);
//! assert_eq!(
//!     diff.interfaces["eth0"].system_state.missing_addresses,
//!     vec!["192.168.0.1/24".to_string()]
//! );
//! ```

mod deserializer;
mod diff;
mod dns;
mod error;
mod iface;
mod ip;
mod merged;
mod missing;
mod netplan_state;
mod report;
mod route;
mod state_diff;
mod system_state;


pub use crate::dns::NameServiceConfig;
pub use crate::error::{ErrorKind, NetplanStateError};
pub use crate::iface::{InterfaceIdentity, InterfaceType};
pub use crate::ip::{AddressFlags, AddressRecord, NetplanAddress};
pub use crate::merged::{
    FullState, MergedInterface, NetplanInterfaceState, SystemInterfaceState,
};
pub use crate::netplan_state::{NetDefinition, NetplanState};
pub use crate::report::{DiffReport, DiffState, InterfaceDiff};
pub use crate::route::{default_tables_name_to_number, Route, SystemRoute};
pub use crate::state_diff::NetplanDiffState;
pub use crate::system_state::{SystemInterface, SystemState};
