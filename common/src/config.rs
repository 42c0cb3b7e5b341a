use std::path::PathBuf;
use std::time::Duration;

/// Everything the preparation pipeline needs to know, threaded explicitly
/// through each step. Paths are fields so tests can point them at temp files.
pub struct Config {
    /// Vendor endpoints that must be reachable before anything is touched.
    ///
    /// Probed in order; failures are collected, not short-circuited.
    pub endpoints: Vec<String>,
    /// Per-request budget for every reachability probe.
    pub probe_timeout: Duration,

    /// Kernel parameter required by the appliance's embedded search engine.
    pub sysctl_key: String,
    pub sysctl_value: u64,
    /// Persistent sysctl configuration, appended to when the key is missing.
    pub sysctl_conf: PathBuf,
    /// Root of the live kernel parameter table.
    pub proc_sys_root: PathBuf,

    /// Name of the container runtime binary looked up on PATH.
    pub runtime_binary: String,
    /// Hosted install script for the container runtime.
    pub runtime_install_url: String,
    /// Exported as VERSION to the runtime install script.
    pub runtime_version: String,
    /// Runtime daemon configuration, read as an address-discovery fallback.
    pub daemon_config: PathBuf,
    /// Virtual interface of the runtime's default bridge network.
    pub bridge_interface: String,

    /// Hosted script of the delegated appliance installer.
    pub installer_url: String,
    /// Directory the appliance stores its state under, checked for free
    /// space before handing over to the delegated installer.
    pub data_dir: PathBuf,
    /// Feature tags forwarded verbatim to the delegated installer.
    pub installer_tags: Vec<String>,
    /// Port the appliance admin console binds to.
    pub ui_port: u16,

    /// Skip the non-production storage prompt.
    pub assume_yes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoints: vec![
                "https://get.replicated.com".to_string(),
                "https://registry.replicated.com".to_string(),
                "https://registry-data.replicated.com".to_string(),
                "https://index.docker.io".to_string(),
                "https://quay.io".to_string(),
            ],
            probe_timeout: Duration::from_secs(10),
            sysctl_key: "vm.max_map_count".to_string(),
            sysctl_value: 262_144,
            sysctl_conf: PathBuf::from("/etc/sysctl.conf"),
            proc_sys_root: PathBuf::from("/proc/sys"),
            runtime_binary: "docker".to_string(),
            runtime_install_url: "https://get.docker.com".to_string(),
            runtime_version: "20.10.17".to_string(),
            daemon_config: PathBuf::from("/etc/docker/daemon.json"),
            bridge_interface: "docker0".to_string(),
            installer_url: "https://get.replicated.com/docker".to_string(),
            data_dir: PathBuf::from("/var/lib/replicated"),
            installer_tags: vec!["no-docker".to_string()],
            ui_port: 8800,
            assume_yes: false,
        }
    }
}
