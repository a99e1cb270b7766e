// SPDX-License-Identifier: Apache-2.0

use crate::{
    missing::MissingInterfaces,
    unit_tests::testlib::{new_netplan_state, new_system_state},
    InterfaceType, NetDefinition,
};

#[test]
fn test_missing_interfaces_both_sides() {
    let system = new_system_state(&[
        ("eth0", Some("eth0")),
        ("docker0", None),
        ("virbr0", None),
    ]);
    let netplan = new_netplan_state(&["eth0", "eth2", "eth1"]);

    let missing = MissingInterfaces::new(&system, &netplan);

    assert_eq!(missing.system, vec!["eth1", "eth2"]);
    assert_eq!(missing.netplan, vec!["docker0", "virbr0"]);
}

#[test]
fn test_missing_interfaces_ignore_loopback() {
    let system = new_system_state(&[("lo", None), ("eth0", Some("eth0"))]);
    let netplan = new_netplan_state(&["eth0"]);

    let missing = MissingInterfaces::new(&system, &netplan);

    assert!(missing.system.is_empty());
    assert!(missing.netplan.is_empty());
}

#[test]
fn test_missing_interfaces_ignore_loopback_declared_with_other_id() {
    let system = new_system_state(&[("lo", Some("loopback"))]);
    let netplan = new_netplan_state(&[]);

    let missing = MissingInterfaces::new(&system, &netplan);

    assert!(missing.netplan.is_empty());
}

#[test]
fn test_missing_interfaces_ignore_disconnected_wifi() {
    let system = new_system_state(&[]);
    let mut netplan = new_netplan_state(&["eth0"]);
    netplan.append_netdef("wlan0", NetDefinition::new(InterfaceType::Wifi));

    let missing = MissingInterfaces::new(&system, &netplan);

    assert_eq!(missing.system, vec!["eth0"]);
}

#[test]
fn test_missing_interfaces_id_not_in_netplan() {
    let system = new_system_state(&[("eth0", Some("stale-id"))]);
    let netplan = new_netplan_state(&[]);

    let missing = MissingInterfaces::new(&system, &netplan);

    assert_eq!(missing.netplan, vec!["eth0"]);
}
