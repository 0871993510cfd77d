//! Integration tests for the `odlctl` CLI binary.
//!
//! Argument parsing, help output, completions and error exit codes run
//! without a controller; the rest talk to a wiremock RESTCONF root.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NODES: &str = "/restconf/operational/opendaylight-inventory:nodes";
const NODE_1: &str = "/restconf/operational/opendaylight-inventory:nodes/node/openflow:1";
const FLOW_PUT: &str =
    "/restconf/config/opendaylight-inventory:nodes/node/openflow:1/table/0/flow/f9";

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `odlctl` binary with env isolation.
///
/// Clears all `ODL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn odlctl_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("odlctl");
    cmd.env("HOME", "/tmp/odlctl-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/odlctl-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ODL_URL")
        .env_remove("ODL_HOST")
        .env_remove("ODL_PORT")
        .env_remove("ODL_USER")
        .env_remove("ODL_PASS")
        .env_remove("ODL_OUTPUT")
        .env_remove("ODL_INSECURE")
        .env_remove("ODL_TIMEOUT");
    cmd
}

/// Command pointed at `server` with an explicit password, so the keyring
/// is never consulted.
fn against(server: &MockServer) -> assert_cmd::Command {
    let mut cmd = odlctl_cmd();
    cmd.env("ODL_URL", format!("{}/restconf", server.uri()))
        .env("ODL_PASS", "admin");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn inventory_node(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "flow-node-inventory:ip-address": "10.0.0.1",
        "flow-node-inventory:hardware": "Open vSwitch",
        "flow-node-inventory:table": [
            {
                "id": 0,
                "flow": [
                    {
                        "id": "low",
                        "priority": 10,
                        "match": {},
                        "instructions": {
                            "instruction": [{
                                "order": 0,
                                "apply-actions": {
                                    "action": [
                                        { "order": 0, "output-action": { "output-node-connector": 1 } }
                                    ]
                                }
                            }]
                        }
                    },
                    { "id": "high", "priority": 900, "match": { "in-port": "2" } }
                ]
            },
            { "id": 1, "flow": [] }
        ],
        "node-connector": [
            {
                "id": format!("{id}:1"),
                "flow-node-inventory:port-number": "1",
                "flow-node-inventory:name": "s1-eth1"
            }
        ]
    })
}

async fn mount_node(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(NODE_1))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "node": [inventory_node("openflow:1")] })),
        )
        .mount(server)
        .await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = odlctl_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    odlctl_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("OpenDaylight")
            .and(predicate::str::contains("node"))
            .and(predicate::str::contains("connector"))
            .and(predicate::str::contains("flow")),
    );
}

#[test]
fn test_version_flag() {
    odlctl_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("odlctl"));
}

#[test]
fn test_flow_create_help_lists_match_and_action_flags() {
    odlctl_cmd()
        .args(["flow", "create", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--dl-src")
                .and(predicate::str::contains("--tunnel-id"))
                .and(predicate::str::contains("--out-port"))
                .and(predicate::str::contains("--actions")),
        );
}

#[test]
fn test_invalid_subcommand() {
    let output = odlctl_cmd().arg("frobnicate").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_positional_is_usage_error() {
    let output = odlctl_cmd().args(["flow", "show", "openflow:1"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    odlctl_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    odlctl_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("odlctl"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path() {
    odlctl_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("odlctl").and(predicate::str::contains("config.toml")));
}

#[test]
fn test_config_show_masks_password_and_applies_flags() {
    odlctl_cmd()
        .env("ODL_PASS", "hunter2")
        .args(["--host", "odl.lab", "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("host = \"odl.lab\"")
                .and(predicate::str::contains("****"))
                .and(predicate::str::contains("hunter2").not()),
        );
}

#[test]
fn test_config_file_is_loaded_and_flags_win() {
    let dir = tempfile::tempdir().unwrap();
    let app_dir = dir.path().join("odlctl");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(
        app_dir.join("config.toml"),
        "host = \"file.lab\"\nport = 8080\nuser = \"ops\"\n",
    )
    .unwrap();

    odlctl_cmd()
        .env("XDG_CONFIG_HOME", dir.path())
        .args(["--port", "9191", "config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("host = \"file.lab\"")
                .and(predicate::str::contains("port = 9191"))
                .and(predicate::str::contains("user = \"ops\"")),
        );
}

// ── Errors without a controller ─────────────────────────────────────

#[test]
fn test_connection_refused_exit_code() {
    let output = odlctl_cmd()
        .env("ODL_PASS", "admin")
        .args(["--url", "http://127.0.0.1:1/restconf", "--timeout", "2", "node", "list"])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(7),
        "{}",
        combined_output(&output)
    );
}

#[test]
fn test_unknown_action_kind_is_usage_error() {
    let output = odlctl_cmd()
        .env("ODL_PASS", "admin")
        .args([
            "--url",
            "http://127.0.0.1:1/restconf",
            "flow",
            "create",
            "openflow:1",
            "0",
            "f1",
            "--actions",
            "flood:1",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("flood"));
}

// ── Against a mock controller ───────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_node_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NODES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nodes": { "node": [inventory_node("openflow:1"), inventory_node("openflow:2")] }
        })))
        .mount(&server)
        .await;

    let output = against(&server)
        .args(["-o", "json-compact", "node", "list"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let nodes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = nodes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["openflow:1", "openflow:2"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_node_list_table_counts_active_tables() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(NODES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nodes": { "node": [inventory_node("openflow:1")] }
        })))
        .mount(&server)
        .await;

    let output = against(&server).args(["node", "list"]).output().unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("openflow:1"), "{text}");
    assert!(text.contains("10.0.0.1"), "{text}");
    assert!(text.contains("Open vSwitch"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_flow_list_sorted_with_summaries() {
    let server = MockServer::start().await;
    mount_node(&server).await;

    let output = against(&server)
        .args(["flow", "list", "openflow:1"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let text = String::from_utf8_lossy(&output.stdout);
    assert!(
        text.contains(r#"output-action: {"output-node-connector": 1}"#),
        "{text}"
    );
    assert!(text.contains(r#"in-port: "2""#), "{text}");
    assert!(text.contains("Drop"), "{text}");
    let high = text.find("high").unwrap();
    let low = text.find("low").unwrap();
    assert!(high < low, "higher priority first:\n{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_table_list_skips_empty_tables() {
    let server = MockServer::start().await;
    mount_node(&server).await;

    let output = against(&server)
        .args(["-o", "plain", "table", "list", "openflow:1"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_connector_is_not_found() {
    let server = MockServer::start().await;
    mount_node(&server).await;

    let output = against(&server)
        .args(["connector", "show", "openflow:1", "42"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("42"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_node_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{}"))
        .mount(&server)
        .await;

    let output = against(&server)
        .args(["node", "show", "openflow:9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_flow_create_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(FLOW_PUT))
        .and(body_string_contains("<output-node-connector>2</output-node-connector>"))
        .and(body_string_contains("<priority>32768</priority>"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = against(&server)
        .args([
            "flow",
            "create",
            "openflow:1",
            "0",
            "f9",
            "--in-port",
            "1",
            "--out-port",
            "2",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Accepted"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_flow_create_rejected_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(FLOW_PUT))
        .respond_with(ResponseTemplate::new(409).set_body_string("data-exists"))
        .mount(&server)
        .await;

    let output = against(&server)
        .args(["flow", "create", "openflow:1", "0", "f9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("rejected"));
}
