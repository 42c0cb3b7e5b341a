//! # Kernel Parameter Enforcer
//!
//! The appliance embeds a search engine that refuses to start unless
//! `vm.max_map_count` is at least 262144. Two independent checks, two
//! independent corrective actions: one for the persistent configuration
//! file, one for the running kernel. Both are idempotent.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::process::Command;

use preppr_common::{config::Config, error::PrepError};
use tracing::{debug, info};

pub fn enforce(cfg: &Config) -> Result<(), PrepError> {
    ensure_persistent(cfg)?;
    ensure_live(cfg)?;
    Ok(())
}

/// True when a non-comment line in the sysctl configuration assigns `key`.
/// The assigned value is not inspected; an operator override stands.
fn conf_defines_key(content: &str, key: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .any(|line| {
            line.split('=')
                .next()
                .map(str::trim)
                .is_some_and(|lhs| lhs == key)
        })
}

/// Appends `key=value` to the sysctl configuration file unless a line for
/// `key` already exists. A missing file is created.
pub fn ensure_persistent(cfg: &Config) -> Result<(), PrepError> {
    let content: String = match fs::read_to_string(&cfg.sysctl_conf) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
        Err(err) => {
            return Err(PrepError::ConfigWriteFailed {
                path: cfg.sysctl_conf.clone(),
                source: err,
            });
        }
    };

    if conf_defines_key(&content, &cfg.sysctl_key) {
        debug!("{} already present in {}", cfg.sysctl_key, cfg.sysctl_conf.display());
        return Ok(());
    }

    let write_result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cfg.sysctl_conf)
        .and_then(|mut file| {
            if !content.is_empty() && !content.ends_with('\n') {
                writeln!(file)?;
            }
            writeln!(file, "{}={}", cfg.sysctl_key, cfg.sysctl_value)
        });

    write_result.map_err(|err| PrepError::ConfigWriteFailed {
        path: cfg.sysctl_conf.clone(),
        source: err,
    })?;

    info!("persisted {}={} to {}", cfg.sysctl_key, cfg.sysctl_value, cfg.sysctl_conf.display());
    Ok(())
}

/// Reads the parameter from the live kernel table, e.g.
/// `/proc/sys/vm/max_map_count` for `vm.max_map_count`.
pub fn live_value(cfg: &Config) -> Option<u64> {
    let path = cfg.proc_sys_root.join(cfg.sysctl_key.replace('.', "/"));
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

/// Applies the parameter to the running kernel when the current value is
/// absent or below the required one. An already-sufficient value performs
/// no write.
pub fn ensure_live(cfg: &Config) -> Result<(), PrepError> {
    if live_value(cfg).is_some_and(|current| current >= cfg.sysctl_value) {
        debug!("{} already active in the running kernel", cfg.sysctl_key);
        return Ok(());
    }

    let assignment: String = format!("{}={}", cfg.sysctl_key, cfg.sysctl_value);
    let status = Command::new("sysctl")
        .arg("-w")
        .arg(&assignment)
        .status()
        .map_err(|err| PrepError::ParameterApplyFailed {
            key: cfg.sysctl_key.clone(),
            detail: err.to_string(),
        })?;

    if !status.success() {
        return Err(PrepError::ParameterApplyFailed {
            key: cfg.sysctl_key.clone(),
            detail: format!("sysctl -w exited with {status}"),
        });
    }

    info!("applied {assignment} to the running kernel");
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
