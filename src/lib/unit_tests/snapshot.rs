// SPDX-License-Identifier: Apache-2.0

use crate::{
    unit_tests::testlib::new_system_addr, ErrorKind, InterfaceIdentity,
    InterfaceType, NetplanAddress, NetplanState, SystemState,
};

#[test]
fn test_system_state_from_netplan_status_json() {
    let system = SystemState::new_from_json(
        r#"{
  "netplan-global-state": {
    "online": true,
    "nameservers": {"addresses": ["127.0.0.53"]}
  },
  "lo": {
    "index": 1,
    "adminstate": "UP",
    "type": "ethernet",
    "addresses": [{"127.0.0.1": {"prefix": 8, "flags": []}}]
  },
  "enp0s3": {
    "index": 2,
    "type": "ethernet",
    "id": "eth0",
    "macaddress": "52:54:00:12:34:56",
    "addresses": [
      {"192.0.2.10": {"prefix": 24, "flags": ["dhcp"]}},
      {"fe80::5054:ff:fe12:3456": {"prefix": 64, "flags": ["link"]}}
    ],
    "dns_addresses": ["192.0.2.1"],
    "dns_search": ["example.org"],
    "routes": [
      {"to": "default", "via": "192.0.2.1", "family": 2,
       "metric": 100, "type": "unicast", "scope": "global",
       "protocol": "dhcp", "table": "main"}
    ]
  }
}"#,
    )
    .unwrap();

    assert_eq!(system.interfaces.len(), 2);
    assert_eq!(
        system.interface_list,
        vec![
            InterfaceIdentity::new("lo", None, InterfaceType::Ethernet),
            InterfaceIdentity::new(
                "enp0s3",
                Some("eth0"),
                InterfaceType::Ethernet,
            ),
        ]
    );

    let iface = &system.interfaces["enp0s3"];
    assert_eq!(iface.netdef_id(), Some("eth0"));
    assert_eq!(iface.macaddress.as_deref(), Some("52:54:00:12:34:56"));
    assert_eq!(
        iface.addresses[0],
        new_system_addr("192.0.2.10", 24, &["dhcp"])
    );
    assert_eq!(iface.dns_addresses, vec!["192.0.2.1"]);
    assert_eq!(iface.dns_search, vec!["example.org"]);
    assert_eq!(iface.routes.len(), 1);
    assert_eq!(iface.routes[0].table.as_deref(), Some("main"));
    assert_eq!(iface.routes[0].to_netplan_route().table, Some(254));
}

#[test]
fn test_system_state_empty_id() {
    let system = SystemState::new_from_yaml(
        r"
eth0:
  type: ethernet
  id: ''
",
    )
    .unwrap();
    assert_eq!(system.interfaces["eth0"].netdef_id(), None);
    assert_eq!(system.interface_list[0].netdef_id, None);
}

#[test]
fn test_system_state_invalid() {
    let result = SystemState::new_from_yaml("- eth0\n- eth1\n");
    assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::InvalidArgument));

    let result = SystemState::new_from_yaml(
        r"
eth0:
  addresses: 192.0.2.10
",
    );
    assert!(result.is_err());
}

#[test]
fn test_netplan_state_from_network_document() {
    let netplan = NetplanState::new_from_yaml(
        r"
network:
  version: 2
  renderer: networkd
  ethernets:
    eth0:
      dhcp4: 'yes'
      dhcp6: false
      macaddress: 52:54:00:12:34:56
      addresses:
      - 192.0.2.1/24
      - 2001:db8::1/64:
          label: myip
      nameservers:
        addresses: [192.0.2.53]
        search: [example.org]
      routes:
      - to: default
        via: 192.0.2.254
      - to: 2001:db8:1::/64
        via: 2001:db8::254
        metric: 100
        table: 1000
    eth1: {}
  wifis:
    wlan0:
      dhcp4: true
  bridges:
    br0:
      interfaces: [eth1]
",
    )
    .unwrap();

    let ids: Vec<&str> = netplan.netdefs.keys().map(|k| k.as_str()).collect();
    assert_eq!(ids, vec!["br0", "eth0", "eth1", "wlan0"]);

    let eth0 = netplan.get("eth0").unwrap();
    assert_eq!(eth0.iface_type, InterfaceType::Ethernet);
    assert!(eth0.dhcp4);
    assert!(!eth0.dhcp6);
    assert_eq!(eth0.macaddress.as_deref(), Some("52:54:00:12:34:56"));
    assert_eq!(eth0.addresses[0], NetplanAddress::new("192.0.2.1/24"));
    assert_eq!(eth0.addresses[1].label.as_deref(), Some("myip"));
    assert_eq!(eth0.nameservers.addresses, vec!["192.0.2.53"]);
    assert_eq!(eth0.nameservers.search, vec!["example.org"]);
    assert_eq!(eth0.routes[0].family, Some(2));
    assert_eq!(eth0.routes[1].family, Some(10));
    assert_eq!(eth0.routes[1].metric, Some(100));
    assert_eq!(eth0.routes[1].table, Some(1000));

    assert_eq!(netplan.get("wlan0").unwrap().iface_type, InterfaceType::Wifi);
    assert_eq!(netplan.get("br0").unwrap().iface_type, InterfaceType::Bridge);
}

#[test]
fn test_netplan_state_from_netdef_map() {
    let netplan = NetplanState::new_from_yaml(
        r"
eth0:
  type: ethernets
  dhcp4: true
wlan0:
  type: wifi
",
    )
    .unwrap();

    let eth0 = netplan.get("eth0").unwrap();
    assert_eq!(eth0.iface_type, InterfaceType::Ethernet);
    assert!(eth0.dhcp4);
    assert_eq!(netplan.get("wlan0").unwrap().iface_type, InterfaceType::Wifi);
}

#[test]
fn test_netplan_state_empty() {
    assert_eq!(
        NetplanState::new_from_yaml("network:\n").unwrap(),
        NetplanState::new()
    );
    assert_eq!(
        NetplanState::new_from_yaml("network:\n  ethernets:\n").unwrap(),
        NetplanState::new()
    );
}

#[test]
fn test_netplan_state_invalid_netdef() {
    let result = NetplanState::new_from_yaml(
        r"
network:
  ethernets:
    eth0:
      dhcp4: maybe
",
    );
    let e = result.unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidArgument);
    assert!(e.msg().contains("eth0"));
}

#[test]
fn test_interface_type_names() {
    assert_eq!(InterfaceType::from("dummy-devices"), InterfaceType::Dummy);
    assert_eq!(InterfaceType::from("dummy"), InterfaceType::Dummy);
    assert_eq!(InterfaceType::from("virtual-ethernets").to_string(), "veth");
    assert_eq!(
        InterfaceType::from("wireguard"),
        InterfaceType::Other("wireguard".to_string())
    );
    assert_eq!(InterfaceType::from("wireguard").to_string(), "wireguard");
}
