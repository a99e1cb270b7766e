// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
/// DNS client configuration of an interface. Example partial YAML of a
/// netplan interface:
/// ```yaml
/// nameservers:
///   addresses:
///   - 192.0.2.53
///   - 2001:db8::53
///   search:
///   - example.org
/// ```
pub struct NameServiceConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Name server IP address list.
    pub addresses: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Search list for host-name lookup.
    pub search: Vec<String>,
}
