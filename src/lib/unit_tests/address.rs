// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use crate::{
    diff::address::{dhcp_address_obtained, static_addresses},
    diff::gen_iface_diff,
    unit_tests::testlib::{
        new_eth_netdef, new_merged_iface, new_system_addr, new_system_iface,
    },
    AddressFlags, AddressRecord, NetplanAddress,
};

fn gen_addresses(addrs: &[(&str, &[&str])]) -> BTreeMap<String, AddressFlags> {
    addrs
        .iter()
        .map(|(addr, flags)| {
            (
                addr.to_string(),
                AddressFlags {
                    flags: flags.iter().map(|f| f.to_string()).collect(),
                },
            )
        })
        .collect()
}

#[test]
fn test_address_record_deserialize() {
    let addrs: Vec<AddressRecord> = serde_yaml::from_str(
        r"
- 192.0.2.10:
    prefix: 24
    flags: [dhcp]
- fe80::1:
    prefix: '64'
    flags: [link]
- 2001:db8::1: {}
",
    )
    .unwrap();
    assert_eq!(
        addrs,
        vec![
            new_system_addr("192.0.2.10", 24, &["dhcp"]),
            new_system_addr("fe80::1", 64, &["link"]),
            new_system_addr("2001:db8::1", 128, &[]),
        ]
    );
    assert_eq!(addrs[0].to_ip_prefix(), "192.0.2.10/24");
}

#[test]
fn test_address_record_deserialize_multiple_addr_in_entry() {
    let result = serde_yaml::from_str::<Vec<AddressRecord>>(
        r"
- 192.0.2.10:
    prefix: 24
  192.0.2.11:
    prefix: 24
",
    );
    assert!(result.is_err());
}

#[test]
fn test_netplan_address_deserialize() {
    let addrs: Vec<NetplanAddress> = serde_yaml::from_str(
        r"
- 192.0.2.1/24
- 192.0.2.2/24:
    label: myip
    lifetime: 0
- 2001:db8::1/64:
",
    )
    .unwrap();
    assert_eq!(addrs[0], NetplanAddress::new("192.0.2.1/24"));
    assert_eq!(addrs[1].address, "192.0.2.2/24");
    assert_eq!(addrs[1].label.as_deref(), Some("myip"));
    assert_eq!(addrs[1].lifetime.as_deref(), Some("0"));
    assert_eq!(addrs[1].flags(), vec!["label: myip", "lifetime: 0"]);
    assert_eq!(addrs[2], NetplanAddress::new("2001:db8::1/64"));
}

#[test]
fn test_static_addresses_ignore_dynamic() {
    let addrs = gen_addresses(&[
        ("192.0.2.10/24", &["dhcp"]),
        ("fe80::1/64", &["link"]),
        ("198.51.100.1/24", &[]),
        ("2001:db8::1/64", &["label: myip"]),
    ]);
    let mut static_addrs: Vec<&str> =
        static_addresses(&addrs).into_iter().collect();
    static_addrs.sort_unstable();
    assert_eq!(static_addrs, vec!["198.51.100.1/24", "2001:db8::1/64"]);
}

#[test]
fn test_dhcp_address_obtained_per_family() {
    assert_eq!(
        dhcp_address_obtained(&gen_addresses(&[("192.0.2.10/24", &["dhcp"])])),
        (true, false)
    );
    assert_eq!(
        dhcp_address_obtained(&gen_addresses(&[(
            "2001:db8::10/128",
            &["dhcp"]
        )])),
        (false, true)
    );
    assert_eq!(
        dhcp_address_obtained(&gen_addresses(&[
            ("192.0.2.10/24", &[]),
            ("fe80::1/64", &["link"]),
        ])),
        (false, false)
    );
}

#[test]
fn test_address_diff_symmetric() {
    let mut iface = new_system_iface(Some("eth0"));
    iface.addresses = vec![
        new_system_addr("192.0.2.10", 24, &[]),
        new_system_addr("198.51.100.1", 24, &[]),
    ];
    let mut netdef = new_eth_netdef();
    netdef.addresses = vec![
        NetplanAddress::new("192.0.2.10/24"),
        NetplanAddress::new("203.0.113.1/24"),
    ];

    let diff =
        gen_iface_diff("eth0", &new_merged_iface(&iface, "eth0", &netdef));

    assert_eq!(diff.system_state.missing_addresses, vec!["203.0.113.1/24"]);
    assert_eq!(diff.netplan_state.missing_addresses, vec!["198.51.100.1/24"]);
}

#[test]
fn test_address_diff_missing_dhcp() {
    let mut iface = new_system_iface(Some("eth0"));
    iface.addresses = vec![
        new_system_addr("2001:db8::10", 128, &["dhcp"]),
        new_system_addr("fe80::1", 64, &["link"]),
    ];
    let mut netdef = new_eth_netdef();
    netdef.dhcp4 = true;
    netdef.dhcp6 = true;

    let diff =
        gen_iface_diff("eth0", &new_merged_iface(&iface, "eth0", &netdef));

    assert!(diff.system_state.missing_dhcp4_address);
    assert!(!diff.system_state.missing_dhcp6_address);
    assert!(diff.system_state.missing_addresses.is_empty());
    assert!(diff.netplan_state.missing_addresses.is_empty());
    assert!(!diff.netplan_state.missing_dhcp4_address);
}

#[test]
fn test_address_diff_dhcp_address_not_missing() {
    let mut iface = new_system_iface(Some("eth0"));
    iface.addresses = vec![new_system_addr("192.168.0.1", 24, &["dhcp"])];
    let mut netdef = new_eth_netdef();
    netdef.dhcp4 = true;

    let diff =
        gen_iface_diff("eth0", &new_merged_iface(&iface, "eth0", &netdef));

    assert!(diff.is_empty());
}

#[test]
fn test_address_diff_dhcp_disabled_no_missing_dhcp() {
    let iface = new_system_iface(Some("eth0"));
    let netdef = new_eth_netdef();

    let diff =
        gen_iface_diff("eth0", &new_merged_iface(&iface, "eth0", &netdef));

    assert!(!diff.system_state.missing_dhcp4_address);
    assert!(!diff.system_state.missing_dhcp6_address);
}
