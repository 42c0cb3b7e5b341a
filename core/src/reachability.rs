//! # Endpoint Reachability Probe
//!
//! First gate of the preparation pipeline: every vendor endpoint the
//! appliance pulls from must answer before anything on the host is touched.

use std::time::Duration;

use preppr_common::{config::Config, error::PrepError};
use reqwest::Client;
use tracing::{debug, warn};

/// Issues a best-effort GET against `url`. Any response at all counts as
/// reachable; connect errors and timeouts do not.
pub async fn endpoint_reachable(client: &Client, url: &str, timeout: Duration) -> bool {
    client.get(url).timeout(timeout).send().await.is_ok()
}

/// Probes every configured endpoint in order and collects the ones that did
/// not answer. Deliberately does not short-circuit: the operator gets the
/// complete remediation list in one run.
pub async fn check_endpoints(client: &Client, cfg: &Config) -> Result<(), PrepError> {
    let mut unreachable: Vec<String> = Vec::new();

    for url in &cfg.endpoints {
        if endpoint_reachable(client, url, cfg.probe_timeout).await {
            debug!("{url} is reachable");
        } else {
            warn!("{url} did not answer within {:?}", cfg.probe_timeout);
            unreachable.push(url.clone());
        }
    }

    if unreachable.is_empty() {
        Ok(())
    } else {
        Err(PrepError::NetworkUnreachable(unreachable))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
