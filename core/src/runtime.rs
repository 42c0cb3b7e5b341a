//! # Container Runtime Install
//!
//! The appliance runs on Docker. When the binary is already resolvable on
//! PATH the whole step is skipped; otherwise the vendor's hosted install
//! script is fetched and piped to `sh`.

use std::env;
use std::path::PathBuf;

use preppr_common::{config::Config, error::PrepError};
use reqwest::Client;
use tracing::info;

use crate::{reachability, shell};

/// `which`-style lookup over the PATH entries.
pub fn binary_on_path(name: &str) -> bool {
    let Some(path) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&path).any(|dir: PathBuf| dir.join(name).is_file())
}

pub async fn ensure_runtime(client: &Client, cfg: &Config) -> Result<(), PrepError> {
    if binary_on_path(&cfg.runtime_binary) {
        info!("{} already installed, skipping runtime install", cfg.runtime_binary);
        return Ok(());
    }

    if !reachability::endpoint_reachable(client, &cfg.runtime_install_url, cfg.probe_timeout).await
    {
        return Err(PrepError::InstallerUnreachable(
            cfg.runtime_install_url.clone(),
        ));
    }

    info!("installing {} {} from {}", cfg.runtime_binary, cfg.runtime_version, cfg.runtime_install_url);

    let script: String = fetch_install_script(client, &cfg.runtime_install_url).await?;
    let status = shell::pipe_to_interpreter(
        "sh",
        &script,
        &[],
        &[("VERSION", cfg.runtime_version.as_str())],
    )
    .map_err(|err| PrepError::InstallFailed(err.to_string()))?;

    if !status.success() {
        return Err(PrepError::InstallFailed(format!(
            "runtime install script exited with {status}"
        )));
    }

    Ok(())
}

async fn fetch_install_script(client: &Client, url: &str) -> Result<String, PrepError> {
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
