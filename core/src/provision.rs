//! # Preparation Pipeline
//!
//! Strictly linear: network probe, kernel tuning, runtime install, address
//! discovery, storage warning, delegated install. The first failing step
//! aborts the run; there is no retry and no partial-progress resume.

use std::path::Path;

use preppr_common::{config::Config, error::PrepError, prompt::OperatorPrompt};
use reqwest::Client;
use sysinfo::{DiskExt, System, SystemExt};
use tracing::{info, warn};

use crate::{address, installer, reachability, runtime, sysctl};

const MIN_FREE_BYTES: u64 = 10 * 1024 * 1024 * 1024;

/// How a completed run ended. `Declined` is a clean exit, not a failure.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Declined,
}

pub async fn provision(cfg: &Config, prompt: &dyn OperatorPrompt) -> Result<Outcome, PrepError> {
    let client = Client::new();

    info!("probing {} vendor endpoints", cfg.endpoints.len());
    reachability::check_endpoints(&client, cfg).await?;

    info!("enforcing {}={}", cfg.sysctl_key, cfg.sysctl_value);
    sysctl::enforce(cfg)?;

    runtime::ensure_runtime(&client, cfg).await?;

    let bridge = address::bridge_address(cfg)?;
    let host = address::host_address()?;
    info!("resolved bridge address {bridge}, host address {host}");

    if !cfg.assume_yes && !storage_suitable(&cfg.data_dir) {
        warn!(
            "less than 10 GiB free under {}, not a production-grade setup",
            cfg.data_dir.display()
        );
        if !prompt.confirm_continue("Continue anyway?") {
            return Ok(Outcome::Declined);
        }
    }

    installer::run_delegated_install(&client, cfg, bridge, host).await?;
    Ok(Outcome::Completed)
}

/// Free space on the filesystem backing the appliance data directory.
/// An unrecognizable mount table counts as suitable; the warning is soft.
fn storage_suitable(data_dir: &Path) -> bool {
    let mut system = System::new();
    system.refresh_disks_list();

    let backing_disk = system
        .disks()
        .iter()
        .filter(|disk| data_dir.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len());

    match backing_disk {
        Some(disk) => disk.available_space() >= MIN_FREE_BYTES,
        None => true,
    }
}
