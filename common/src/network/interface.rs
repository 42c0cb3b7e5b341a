use std::net::Ipv4Addr;

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

/// IPv4-centric accessors for [`NetworkInterface`] records.
pub trait NetworkInterfaceExt {
    fn ipv4_nets(&self) -> Vec<Ipv4Network>;
    fn first_ipv4(&self) -> Option<Ipv4Addr>;
}

impl NetworkInterfaceExt for NetworkInterface {
    fn ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|net| match net {
                IpNetwork::V4(ipv4) => Some(*ipv4),
                IpNetwork::V6(_) => None,
            })
            .collect()
    }

    fn first_ipv4(&self) -> Option<Ipv4Addr> {
        self.ipv4_nets().first().map(|net| net.ip())
    }
}

/// Walks the interface table in order and returns the first non-loopback
/// IPv4 address. The table is taken as a slice so callers can substitute
/// a fixed one.
pub fn first_routable_ipv4(interfaces: &[NetworkInterface]) -> Option<Ipv4Addr> {
    interfaces
        .iter()
        .filter(|interface| !interface.is_loopback())
        .flat_map(|interface| interface.ipv4_nets())
        .map(|net| net.ip())
        .find(|addr| !addr.is_loopback())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
