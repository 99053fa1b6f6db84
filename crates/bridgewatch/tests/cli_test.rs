//! Integration tests for the `bridgewatch` CLI binary.
//!
//! Argument parsing, config handling, and one-shot listing against a
//! wiremock bridget service.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `bridgewatch` binary with env isolation.
///
/// Clears all `BRIDGEWATCH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn bw_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("bridgewatch");
    cmd.env("HOME", "/tmp/bridgewatch-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/bridgewatch-cli-test-nonexistent")
        .env_remove("BRIDGEWATCH_BASE_URL")
        .env_remove("BRIDGEWATCH_CONFIG")
        .env_remove("BRIDGEWATCH_OUTPUT")
        .env_remove("BRIDGEWATCH_POLL_INTERVAL_MS")
        .env_remove("BRIDGEWATCH_TIMEOUT_MS")
        .env_remove("BRIDGEWATCH_SERVICE")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn bridget() -> (MockServer, String) {
    let server = MockServer::start().await;
    let base = format!("{}/bridget/v1.0", server.uri());
    (server, base)
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = bw_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn help_lists_commands() {
    bw_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("bridget")
            .and(predicate::str::contains("bridges"))
            .and(predicate::str::contains("ports"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn version_flag() {
    bw_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bridgewatch"));
}

#[test]
fn watch_help_mentions_force() {
    bw_cmd()
        .args(["watch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force").and(predicate::str::contains("--interval-ms")));
}

#[test]
fn completions_bash() {
    bw_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bridgewatch"));
}

#[test]
fn unknown_output_format_is_usage_error() {
    let output = bw_cmd().args(["-o", "xml", "ports"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn config_path_honors_flag() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bw.toml");

    bw_cmd()
        .args(["config", "path", "--config"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("bw.toml"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bw.toml");

    bw_cmd()
        .args(["config", "init", "--config"])
        .arg(&file)
        .assert()
        .success();
    let written = std::fs::read_to_string(&file).unwrap();
    assert!(written.contains("poll_interval_ms = 1000"), "{written}");

    let output = bw_cmd()
        .args(["config", "init", "--config"])
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("already exists"));

    bw_cmd()
        .args(["config", "init", "--force", "--config"])
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn config_show_layers_file_env_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bw.toml");
    std::fs::write(&file, "poll_interval_ms = 500\nservice = \"bridget-lab\"\n").unwrap();

    let output = bw_cmd()
        .env("BRIDGEWATCH_POLL_INTERVAL_MS", "250")
        .args(["-o", "json", "--timeout-ms", "1500", "config", "show", "--config"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["poll_interval_ms"], 250);
    assert_eq!(shown["timeout_ms"], 1500);
    assert_eq!(shown["service"], "bridget-lab");
}

#[test]
fn invalid_base_url_is_usage_error() {
    let output = bw_cmd()
        .args(["--base-url", "not a url", "ports"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("base_url"));
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn ports_plain_lists_one_per_line() {
    let (server, base) = bridget().await;
    Mock::given(method("GET"))
        .and(path("/bridget/v1.0/serial_ports"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!(["/dev/ttyUSB0", "/dev/ttyACM0"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    bw_cmd()
        .args(["--base-url", &base, "-o", "plain", "ports"])
        .assert()
        .success()
        .stdout("/dev/ttyUSB0\n/dev/ttyACM0\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn bridges_json_keeps_unknown_fields() {
    let (server, base) = bridget().await;
    Mock::given(method("GET"))
        .and(path("/bridget/v1.0/bridges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "serial_path": "/dev/ttyUSB0",
            "baud": 115_200,
            "ip": "0.0.0.0",
            "udp_port": 14550,
            "comment": "autopilot"
        }])))
        .mount(&server)
        .await;

    let output = bw_cmd()
        .args(["--base-url", &base, "-o", "json", "bridges"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed[0]["serial_path"], "/dev/ttyUSB0");
    assert_eq!(listed[0]["comment"], "autopilot");
}

#[tokio::test(flavor = "multi_thread")]
async fn bridges_table_shows_columns() {
    let (server, base) = bridget().await;
    Mock::given(method("GET"))
        .and(path("/bridget/v1.0/bridges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "serial_path": "/dev/ttyUSB0",
            "baud": 57_600,
            "ip": "192.168.2.1",
            "udp_port": 15000
        }])))
        .mount(&server)
        .await;

    bw_cmd()
        .args(["--base-url", &base, "--color", "never", "bridges"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Serial")
                .and(predicate::str::contains("57600"))
                .and(predicate::str::contains("192.168.2.1")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_exits_general() {
    let (server, base) = bridget().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let output = bw_cmd()
        .args(["--base-url", &base, "bridges"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("API error"));
}

#[test]
fn unreachable_service_exits_connection() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let output = bw_cmd()
        .args(["--base-url", &format!("http://127.0.0.1:{port}/bridget/v1.0"), "ports"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("offline"));
}
