//! # Delegated Installer Invocation
//!
//! Last step of the pipeline. Everything past the handover is owned by the
//! vendor's installer; responsibility here ends at assembling the argument
//! vector and transporting the fetched script to `bash`.

use std::net::Ipv4Addr;

use preppr_common::{config::Config, error::PrepError};
use reqwest::Client;
use tracing::info;

use crate::shell;

/// Argument vector handed to the delegated installer, in the order it
/// documents: both addresses, the fixed feature tags, the UI port.
pub fn installer_args(cfg: &Config, bridge: Ipv4Addr, host: Ipv4Addr) -> Vec<String> {
    let mut args: Vec<String> = vec![
        format!("private-address={bridge}"),
        format!("public-address={host}"),
    ];
    args.extend(cfg.installer_tags.iter().cloned());
    args.push(format!("ui-bind-port={}", cfg.ui_port));
    args
}

pub async fn run_delegated_install(
    client: &Client,
    cfg: &Config,
    bridge: Ipv4Addr,
    host: Ipv4Addr,
) -> Result<(), PrepError> {
    let args: Vec<String> = installer_args(cfg, bridge, host);
    info!("handing over to {} with {}", cfg.installer_url, args.join(" "));

    let script: String = fetch_script(client, &cfg.installer_url).await?;
    let status = shell::pipe_to_interpreter("bash", &script, &args, &[])
        .map_err(|err| PrepError::InstallFailed(err.to_string()))?;

    if !status.success() {
        return Err(PrepError::InstallFailed(format!(
            "delegated installer exited with {status}"
        )));
    }

    Ok(())
}

async fn fetch_script(client: &Client, url: &str) -> Result<String, PrepError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| PrepError::InstallFailed(err.to_string()))?;
    response
        .text()
        .await
        .map_err(|err| PrepError::InstallFailed(err.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
