//! CLI integration tests
//!
//! These tests run the built binary and check:
//! - Help and version output
//! - Report and log files
//! - Exit codes for invalid input

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the path to the hostprobe binary
fn hostprobe_bin() -> PathBuf {
    // In tests, the binary should be at target/debug/hostprobe
    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .parent()
        .expect("No parent")
        .to_path_buf();

    // If we're in deps/, go up one more level
    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join("hostprobe")
}

/// Runs hostprobe inside `dir` with compose discovery confined to it
fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(hostprobe_bin())
        .args(args)
        .current_dir(dir)
        .env("HOSTPROBE_COMPOSE_ROOTS", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute hostprobe")
}

#[test]
fn test_cli_help() {
    let output = Command::new(hostprobe_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute hostprobe");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hostprobe"));
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--log"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(hostprobe_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute hostprobe");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_default_yaml_report_and_log() {
    let dir = TempDir::new().unwrap();

    let output = run_in(dir.path(), &["--stdout", "false"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report = fs::read_to_string(dir.path().join("system_discovery_report.yaml")).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&report).unwrap();
    assert!(value.get("timestamp").is_some());
    assert!(value.get("hostname").is_some());
    assert!(value.get("system_info").is_some());
    assert!(value.get("web_servers").is_some());
    assert!(value.get("databases").is_some());
    assert!(value.get("docker_containers").is_some());

    let log = fs::read_to_string(dir.path().join("system_discovery.log")).unwrap();
    assert!(log.contains("Starting system discovery"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_json_report_to_explicit_paths() {
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("inventory.json");
    let log_path = dir.path().join("probe.log");

    let output = run_in(
        dir.path(),
        &[
            "--format",
            "json",
            "--output",
            report_path.to_str().unwrap(),
            "--log",
            log_path.to_str().unwrap(),
            "--stdout",
            "false",
        ],
    );
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert!(report["web_servers"].is_array());
    assert!(report["system_info"]["kernel"].is_string());
    assert!(log_path.exists());
    assert!(!dir.path().join("system_discovery_report.json").exists());
}

#[test]
fn test_unwritable_report_path_fails() {
    let dir = TempDir::new().unwrap();
    let report_path = dir.path().join("missing").join("report.yaml");

    let output = run_in(
        dir.path(),
        &["--output", report_path.to_str().unwrap(), "--stdout", "false"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to write report file"));
}

#[test]
fn test_invalid_format_is_rejected() {
    let dir = TempDir::new().unwrap();

    let output = run_in(dir.path(), &["--format", "xml"]);

    assert!(!output.status.success());
    assert!(!dir.path().join("system_discovery_report.xml").exists());
}

#[test]
fn test_log_level_flag_is_case_insensitive() {
    let dir = TempDir::new().unwrap();

    let output = run_in(dir.path(), &["--log-level", "DEBUG", "--stdout", "false"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let log = fs::read_to_string(dir.path().join("system_discovery.log")).unwrap();
    assert!(log.contains("DEBUG"));
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let dir = TempDir::new().unwrap();

    let output = run_in(dir.path(), &["--log-level", "loud"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level"));
}

#[test]
fn test_invalid_timeout_is_rejected() {
    let dir = TempDir::new().unwrap();

    let output = run_in(dir.path(), &["--timeout", "0"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Configuration error"));
}
