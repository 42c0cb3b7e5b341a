use std::net::Ipv4Addr;

use preppr_common::config::Config;
use preppr_common::network::interface::first_routable_ipv4;
use preppr_core::installer;
use preppr_integration_tests::{IFF_BROADCAST, IFF_LOOPBACK, IFF_UP, ni, v4};

#[test]
fn host_discovery_is_deterministic_over_a_fixed_table() {
    let table = [
        ni("lo", 1, &[v4(127, 0, 0, 1, 8)], IFF_UP | IFF_LOOPBACK),
        ni("eth0", 2, &[v4(10, 0, 2, 15, 24)], IFF_UP | IFF_BROADCAST),
        ni("eth1", 3, &[v4(192, 168, 7, 4, 24)], IFF_UP | IFF_BROADCAST),
    ];

    for _ in 0..3 {
        assert_eq!(
            first_routable_ipv4(&table),
            Some(Ipv4Addr::new(10, 0, 2, 15))
        );
    }
}

#[test]
fn loopback_only_table_resolves_nothing() {
    let table = [ni("lo", 1, &[v4(127, 0, 0, 1, 8)], IFF_UP | IFF_LOOPBACK)];
    assert_eq!(first_routable_ipv4(&table), None);
}

#[test]
fn resolved_addresses_format_into_installer_arguments() {
    let table = [
        ni("lo", 1, &[v4(127, 0, 0, 1, 8)], IFF_UP | IFF_LOOPBACK),
        ni("eth0", 2, &[v4(10, 0, 2, 15, 24)], IFF_UP | IFF_BROADCAST),
    ];

    let host: Ipv4Addr = first_routable_ipv4(&table).unwrap();
    let bridge: Ipv4Addr = Ipv4Addr::new(172, 17, 0, 1);
    let cfg = Config::default();

    let args = installer::installer_args(&cfg, bridge, host);
    assert_eq!(
        args,
        vec![
            "private-address=172.17.0.1".to_string(),
            "public-address=10.0.2.15".to_string(),
            "no-docker".to_string(),
            "ui-bind-port=8800".to_string(),
        ]
    );
}
