use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions the preparation pipeline can hit. Every variant aborts
/// the run; there is no retry or partial-progress resume.
#[derive(Debug, Error)]
pub enum PrepError {
    #[error("administrative privileges are required, re-run as root")]
    PermissionDenied,

    /// Carries every endpoint that failed the probe, in probe order.
    #[error("unable to reach: {}", .0.join(", "))]
    NetworkUnreachable(Vec<String>),

    #[error("failed to update {path}: {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to apply kernel parameter {key}: {detail}")]
    ParameterApplyFailed { key: String, detail: String },

    #[error("install script host is unreachable: {0}")]
    InstallerUnreachable(String),

    #[error("install did not complete: {0}")]
    InstallFailed(String),

    #[error("could not determine the container bridge address")]
    BridgeAddressNotFound,

    #[error("could not determine a routable host address")]
    HostAddressNotFound,
}
