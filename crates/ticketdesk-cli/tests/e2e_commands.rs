//! E2E tests for the one-shot `td` commands.
//!
//! Every invocation seeds its own session, so each test starts from the
//! same 100-ticket batch.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a Command targeting the `td` binary with config lookup isolated to `dir`.
fn td_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("td"));
    cmd.current_dir(dir);
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir);
    cmd.env_remove("FORMAT");
    cmd.env("TICKETDESK_LOG", "error");
    cmd
}

fn json_output(dir: &Path, args: &[&str]) -> Value {
    let output = td_cmd(dir).args(args).output().expect("td should not crash");
    assert!(
        output.status.success(),
        "td {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("--json should produce valid JSON")
}

#[test]
fn list_json_returns_seed_batch() {
    let dir = TempDir::new().unwrap();
    let tickets = json_output(dir.path(), &["list", "--json"]);
    let tickets = tickets.as_array().expect("list --json is an array");
    assert_eq!(tickets.len(), 100);
    assert_eq!(tickets[0]["id"], "TICKET-1100");
    assert_eq!(tickets[99]["id"], "TICKET-1001");
    assert!(tickets.iter().all(|t| t.get("attachment").is_none()));
}

#[test]
fn list_is_reproducible_for_a_seed() {
    let dir = TempDir::new().unwrap();
    let first = json_output(dir.path(), &["--seed", "7", "list", "--json"]);
    let second = json_output(dir.path(), &["--seed", "7", "list", "--json"]);
    assert_eq!(first, second);
}

#[test]
fn list_filters_by_status() {
    let dir = TempDir::new().unwrap();
    let tickets = json_output(dir.path(), &["list", "--status", "closed", "--json"]);
    let tickets = tickets.as_array().unwrap();
    assert!(tickets.iter().all(|t| t["status"] == "Closed"));
}

#[test]
fn list_text_mode_has_header_row() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["list", "--format", "text", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID\tIssue Type\tIssue\tStatus"))
        .stdout(predicate::str::contains("TICKET-1099"));
}

#[test]
fn list_rejects_unknown_status() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["list", "--status", "Pending", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E2005"));
}

#[test]
fn create_json_assigns_next_id() {
    let dir = TempDir::new().unwrap();
    let created = json_output(
        dir.path(),
        &["create", "--issue", "x", "--priority", "High", "--json"],
    );
    assert_eq!(created["ticket"]["id"], "TICKET-1101");
    assert_eq!(created["ticket"]["status"], "Open");
    assert_eq!(created["ticket"]["issue_type"], "Bug");
    assert_eq!(created["ticket_count"], 101);
}

#[test]
fn create_keeps_attachment_name_only() {
    let dir = TempDir::new().unwrap();
    let created = json_output(
        dir.path(),
        &[
            "create",
            "-t",
            "requirement",
            "-p",
            "low",
            "-a",
            "/home/me/Designs/mockup.PNG",
            "--json",
        ],
    );
    assert_eq!(created["ticket"]["attachment"], "mockup.PNG");
    assert_eq!(created["ticket"]["priority"], "Low");
}

#[test]
fn create_rejects_invalid_priority() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["create", "--priority", "Critical", "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error_code\": \"E2005\""));
}

#[test]
fn create_rejects_disallowed_attachment() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["create", "--attachment", "run.exe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn create_pretty_output_shows_details() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["create", "--issue", "Printer jam", "--format", "pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ticket submitted!"))
        .stdout(predicate::str::contains("Printer jam"))
        .stdout(predicate::str::contains("Number of tickets: 101"));
}

#[test]
fn stats_json_has_all_views() {
    let dir = TempDir::new().unwrap();
    let stats = json_output(dir.path(), &["stats", "--json"]);
    assert_eq!(stats["summary"]["total"], 100);
    let priorities = stats["priorities"].as_object().unwrap();
    let sum: u64 = priorities.values().filter_map(Value::as_u64).sum();
    assert_eq!(sum, 100);
    let months: u64 = stats["status_per_month"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|bar| bar["count"].as_u64())
        .sum();
    assert_eq!(months, 100);
}

#[test]
fn schema_json_lists_editable_columns() {
    let dir = TempDir::new().unwrap();
    let schema = json_output(dir.path(), &["schema", "--json"]);
    let editable: Vec<&str> = schema["grid"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["editable"] == true)
        .filter_map(|c| c["label"].as_str())
        .collect();
    assert_eq!(editable, ["Status", "Priority"]);
}

#[test]
fn config_file_changes_seed_batch() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("td.toml");
    fs::write(
        &config,
        "output = \"json\"\n\n[seed]\ncount = 10\nfirst_id = 500\n",
    )
    .unwrap();

    let output = td_cmd(dir.path())
        .args(["--config", config.to_str().unwrap(), "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let tickets: Value = serde_json::from_slice(&output.stdout).unwrap();
    let tickets = tickets.as_array().unwrap();
    assert_eq!(tickets.len(), 10);
    assert_eq!(tickets[0]["id"], "TICKET-500");
}

#[test]
fn broken_config_reports_parse_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("td.toml");
    fs::write(&config, "[seed\ncount = ").unwrap();

    td_cmd(dir.path())
        .args(["--config", config.to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("td.toml"));
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().unwrap();
    td_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("td"));
}
