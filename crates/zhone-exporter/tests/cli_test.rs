//! Integration tests for the `zhone-exporter` binary.
//!
//! These cover argument parsing, configuration errors and exit codes; none
//! of them start the server.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the binary with env isolation.
///
/// Clears all `ZHONE_*` env vars and points config directories at a
/// nonexistent path so tests never read a real configuration.
fn exporter_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("zhone-exporter");
    cmd.env("HOME", "/tmp/zhone-exporter-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/zhone-exporter-test-nonexistent")
        .env_remove("ZHONE_HOST")
        .env_remove("ZHONE_USERNAME")
        .env_remove("ZHONE_PASSWORD")
        .env_remove("ZHONE_LISTEN")
        .env_remove("ZHONE_METRICS_PATH")
        .env_remove("ZHONE_TIMEOUT")
        .env_remove("ZHONE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    exporter_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Prometheus exporter")
            .and(predicate::str::contains("--username"))
            .and(predicate::str::contains("--password"))
            .and(predicate::str::contains("--listen"))
            .and(predicate::str::contains("--metrics-path")),
    );
}

#[test]
fn test_version_flag() {
    exporter_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zhone-exporter"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    exporter_cmd().arg("--bogus").assert().code(2);
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_host_is_usage_error() {
    exporter_cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No gateway host"));
}

#[test]
fn test_invalid_listen_address() {
    exporter_cmd()
        .args(["--listen", "nonsense", "192.168.1.1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nonsense"));
}

#[test]
fn test_root_metrics_path_rejected() {
    exporter_cmd()
        .args(["--metrics-path", "/", "192.168.1.1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid metrics path"));
}

#[test]
fn test_missing_config_file() {
    exporter_cmd()
        .args(["--config", "/nonexistent/zhone.toml", "192.168.1.1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("/nonexistent/zhone.toml"));
}

#[test]
fn test_config_file_values_are_validated() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "host = \"192.168.1.1\"\nlisten = \"not-an-address\"").unwrap();

    exporter_cmd()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not-an-address"));
}

#[test]
fn test_malformed_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "timeout = \"soon\"").unwrap();

    exporter_cmd()
        .arg("--config")
        .arg(file.path())
        .arg("192.168.1.1")
        .assert()
        .code(3);
}

#[test]
fn test_env_host_is_used() {
    // The host comes from the environment; the bad listen address proves
    // resolution got past the host check.
    exporter_cmd()
        .env("ZHONE_HOST", "192.168.1.1")
        .env("ZHONE_LISTEN", "bad-listen")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("bad-listen"));
}
