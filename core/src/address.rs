//! # Interface Address Resolver
//!
//! Two discovery routines feed the delegated installer: the container
//! bridge address and the host's routable address. Different OS and
//! runtime generations expose different tooling, so the bridge lookup is
//! an ordered strategy list rather than a single assumed mechanism.
//! Parsers are pure functions over captured output so every tier is
//! testable without the tool present.

use std::fs;
use std::net::Ipv4Addr;
use std::process::Command;

use pnet::datalink;
use preppr_common::{config::Config, error::PrepError};
use preppr_common::network::interface::first_routable_ipv4;
use tracing::debug;

type BridgeStrategy = fn(&Config) -> Option<Ipv4Addr>;

const BRIDGE_STRATEGIES: &[(&str, BridgeStrategy)] = &[
    ("ip", from_ip_tool),
    ("ifconfig", from_ifconfig),
    ("daemon config", from_daemon_config),
    ("network inspect", from_network_inspect),
];

/// Resolves the runtime's bridge interface address, first strategy that
/// yields a value wins.
pub fn bridge_address(cfg: &Config) -> Result<Ipv4Addr, PrepError> {
    for (name, strategy) in BRIDGE_STRATEGIES {
        if let Some(addr) = strategy(cfg) {
            debug!("bridge address {addr} resolved via {name}");
            return Ok(addr);
        }
    }
    Err(PrepError::BridgeAddressNotFound)
}

/// First non-loopback IPv4 across the host's interface table.
pub fn host_address() -> Result<Ipv4Addr, PrepError> {
    first_routable_ipv4(&datalink::interfaces()).ok_or(PrepError::HostAddressNotFound)
}

fn capture_stdout(command: &mut Command) -> Option<String> {
    let output = command.output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn from_ip_tool(cfg: &Config) -> Option<Ipv4Addr> {
    let stdout = capture_stdout(
        Command::new("ip")
            .args(["-4", "addr", "show"])
            .arg(&cfg.bridge_interface),
    )?;
    parse_inet_line(&stdout)
}

fn from_ifconfig(cfg: &Config) -> Option<Ipv4Addr> {
    let stdout = capture_stdout(Command::new("ifconfig").arg(&cfg.bridge_interface))?;
    parse_ifconfig_output(&stdout)
}

fn from_daemon_config(cfg: &Config) -> Option<Ipv4Addr> {
    let content = fs::read_to_string(&cfg.daemon_config).ok()?;
    parse_daemon_bip(&content)
}

fn from_network_inspect(cfg: &Config) -> Option<Ipv4Addr> {
    let stdout = capture_stdout(Command::new(&cfg.runtime_binary).args([
        "network",
        "inspect",
        "bridge",
        "--format",
        "{{range .IPAM.Config}}{{.Gateway}}{{end}}",
    ]))?;
    stdout.trim().parse().ok()
}

/// Pulls the address out of `inet A.B.C.D/len` as printed by `ip addr`.
fn parse_inet_line(output: &str) -> Option<Ipv4Addr> {
    output
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("inet "))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|cidr| cidr.split('/').next())
        .and_then(|addr| addr.parse().ok())
}

/// Handles both ifconfig layouts: `inet addr:A.B.C.D` (net-tools) and
/// `inet A.B.C.D` (BSD-style).
fn parse_ifconfig_output(output: &str) -> Option<Ipv4Addr> {
    for line in output.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("inet addr:") {
            if let Some(addr) = rest.split_whitespace().next() {
                if let Ok(parsed) = addr.parse() {
                    return Some(parsed);
                }
            }
        }
        if let Some(rest) = line.strip_prefix("inet ") {
            if let Some(addr) = rest.split_whitespace().next() {
                if let Ok(parsed) = addr.split('/').next()?.parse() {
                    return Some(parsed);
                }
            }
        }
    }
    None
}

/// Reads the `bip` key (`"bip": "A.B.C.D/len"`) from the daemon's JSON
/// configuration.
fn parse_daemon_bip(content: &str) -> Option<Ipv4Addr> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    value
        .get("bip")?
        .as_str()?
        .split('/')
        .next()?
        .parse()
        .ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    const IP_ADDR_OUTPUT: &str = "\
4: docker0: <NO-CARRIER,BROADCAST,MULTICAST,UP> mtu 1500 qdisc noqueue state DOWN group default
    inet 172.17.0.1/16 brd 172.17.255.255 scope global docker0
       valid_lft forever preferred_lft forever";

    const IFCONFIG_LEGACY_OUTPUT: &str = "\
docker0   Link encap:Ethernet  HWaddr 02:42:c5:32:11:04
          inet addr:172.17.0.1  Bcast:172.17.255.255  Mask:255.255.0.0
          UP BROADCAST MULTICAST  MTU:1500  Metric:1";

    const IFCONFIG_MODERN_OUTPUT: &str = "\
docker0: flags=4099<UP,BROADCAST,MULTICAST>  mtu 1500
        inet 172.17.0.1  netmask 255.255.0.0  broadcast 172.17.255.255
        ether 02:42:c5:32:11:04  txqueuelen 0  (Ethernet)";

    #[test]
    fn parses_ip_tool_output() {
        assert_eq!(
            parse_inet_line(IP_ADDR_OUTPUT),
            Some(Ipv4Addr::new(172, 17, 0, 1))
        );
    }

    #[test]
    fn parses_legacy_ifconfig_output() {
        assert_eq!(
            parse_ifconfig_output(IFCONFIG_LEGACY_OUTPUT),
            Some(Ipv4Addr::new(172, 17, 0, 1))
        );
    }

    #[test]
    fn parses_modern_ifconfig_output() {
        assert_eq!(
            parse_ifconfig_output(IFCONFIG_MODERN_OUTPUT),
            Some(Ipv4Addr::new(172, 17, 0, 1))
        );
    }

    #[test]
    fn parses_daemon_bip_key() {
        let content = r#"{ "bip": "172.26.0.1/16", "log-driver": "json-file" }"#;
        assert_eq!(
            parse_daemon_bip(content),
            Some(Ipv4Addr::new(172, 26, 0, 1))
        );
    }

    #[test]
    fn daemon_config_without_bip_yields_nothing() {
        assert_eq!(parse_daemon_bip(r#"{ "log-driver": "json-file" }"#), None);
        assert_eq!(parse_daemon_bip("not json"), None);
    }

    #[test]
    fn empty_tool_output_yields_nothing() {
        assert_eq!(parse_inet_line(""), None);
        assert_eq!(parse_ifconfig_output(""), None);
    }

    #[test]
    fn ipv6_only_output_yields_nothing() {
        let output = "    inet6 fe80::42:c5ff:fe32:1104/64 scope link";
        assert_eq!(parse_inet_line(output), None);
    }
}
