use std::fs;
use std::time::Duration;

use preppr_common::config::Config;
use preppr_common::error::PrepError;
use preppr_common::prompt::AlwaysContinue;
use preppr_core::{provision, reachability, sysctl};
use preppr_integration_tests::spawn_http_responder;
use reqwest::Client;
use tempfile::TempDir;

#[tokio::test]
async fn unreachable_endpoint_aborts_before_kernel_tuning() {
    let dir = TempDir::new().unwrap();
    let conf = dir.path().join("sysctl.conf");

    let bad = "http://127.0.0.1:1".to_string();
    let cfg = Config {
        endpoints: vec![bad.clone()],
        probe_timeout: Duration::from_secs(1),
        sysctl_conf: conf.clone(),
        proc_sys_root: dir.path().to_path_buf(),
        assume_yes: true,
        ..Config::default()
    };

    let err = provision::provision(&cfg, &AlwaysContinue)
        .await
        .unwrap_err();
    match err {
        PrepError::NetworkUnreachable(failed) => assert_eq!(failed, vec![bad]),
        other => panic!("unexpected error: {other}"),
    }

    assert!(
        !conf.exists(),
        "kernel tuning must not run after a failed probe"
    );
}

#[tokio::test]
async fn probe_reports_only_the_endpoints_that_failed() {
    let reachable = spawn_http_responder().await;
    let unreachable = "http://127.0.0.1:1".to_string();

    let cfg = Config {
        endpoints: vec![reachable, unreachable.clone()],
        probe_timeout: Duration::from_secs(2),
        ..Config::default()
    };

    let err = reachability::check_endpoints(&Client::new(), &cfg)
        .await
        .unwrap_err();
    match err {
        PrepError::NetworkUnreachable(failed) => assert_eq!(failed, vec![unreachable]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn kernel_parameter_enforcement_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let vm = dir.path().join("vm");
    fs::create_dir(&vm).unwrap();
    fs::write(vm.join("max_map_count"), "262144\n").unwrap();

    let cfg = Config {
        sysctl_conf: dir.path().join("sysctl.conf"),
        proc_sys_root: dir.path().to_path_buf(),
        ..Config::default()
    };

    sysctl::enforce(&cfg).unwrap();
    let first = fs::read_to_string(&cfg.sysctl_conf).unwrap();
    sysctl::enforce(&cfg).unwrap();
    let second = fs::read_to_string(&cfg.sysctl_conf).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.matches("vm.max_map_count").count(), 1);
}
