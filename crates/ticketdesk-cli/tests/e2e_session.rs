//! E2E tests for the `td session` JSON-lines loop.

use assert_cmd::Command;
use serde_json::{Value, json};
use std::path::Path;
use tempfile::TempDir;

fn td_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("td"));
    cmd.current_dir(dir);
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir);
    cmd.env("TICKETDESK_LOG", "error");
    cmd
}

/// Feed `requests` to one `td session` process and parse every response line.
fn session(requests: &[Value]) -> Vec<Value> {
    let dir = TempDir::new().unwrap();
    let input: String = requests.iter().map(|r| format!("{r}\n")).collect();
    let output = td_cmd(dir.path())
        .arg("session")
        .write_stdin(input)
        .output()
        .expect("session should not crash");
    assert!(
        output.status.success(),
        "session failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).expect("each response is one JSON line"))
        .collect()
}

#[test]
fn one_response_per_request() {
    let responses = session(&[
        json!({"op": "open"}),
        json!({"op": "snapshot"}),
        json!({"op": "count_by_priority"}),
        json!({"op": "close"}),
    ]);
    assert_eq!(responses.len(), 4);
    assert!(responses.iter().all(|r| r["ok"] == true));
    assert_eq!(responses[1]["tickets"].as_array().map(Vec::len), Some(100));
}

#[test]
fn create_then_edit_then_count() {
    let mut responses = session(&[
        json!({"op": "open", "session": "desk"}),
        json!({"op": "create", "session": "desk", "issue_type": "Bug", "issue": "x", "priority": "High"}),
        json!({"op": "count_by_status", "session": "desk", "status": "Open"}),
        json!({"op": "snapshot", "session": "desk"}),
    ]);
    assert_eq!(responses[1]["ticket"]["id"], "TICKET-1101");
    let open_before = responses[2]["count"].as_u64().unwrap();

    // Close the ticket that was just created, sending the whole grid back.
    let mut tickets = responses.remove(3)["tickets"].as_array().cloned().unwrap();
    assert_eq!(tickets[0]["id"], "TICKET-1101");
    tickets[0]["status"] = json!("Closed");

    let responses = session(&[
        json!({"op": "open", "session": "desk"}),
        json!({"op": "create", "session": "desk", "issue_type": "Bug", "issue": "x", "priority": "High"}),
        json!({"op": "apply_edits", "session": "desk", "tickets": tickets}),
        json!({"op": "count_by_status", "session": "desk", "status": "Open"}),
    ]);
    assert_eq!(responses[2]["ok"], true, "apply_edits failed: {}", responses[2]);
    assert_eq!(responses[2]["changed"], json!(["TICKET-1101"]));
    assert_eq!(responses[3]["count"].as_u64().unwrap(), open_before - 1);
}

#[test]
fn stale_snapshot_is_rejected_and_store_survives() {
    let responses = session(&[
        json!({"op": "open"}),
        json!({"op": "apply_edits", "tickets": [
            {"id": "TICKET-1100", "status": "Closed", "priority": "Low"}
        ]}),
        json!({"op": "snapshot"}),
    ]);
    assert_eq!(responses[1]["ok"], false);
    assert_eq!(responses[1]["error"]["error_code"], "E3001");
    assert_eq!(responses[2]["tickets"].as_array().map(Vec::len), Some(100));
}

#[test]
fn errors_do_not_end_the_loop() {
    let responses = session(&[
        json!({"op": "snapshot", "session": "missing"}),
        json!({"op": "teleport"}),
        json!({"op": "open"}),
        json!({"op": "create", "issue_type": "Bug", "priority": "Urgent"}),
        json!({"op": "count_by_status", "status": "Open"}),
    ]);
    assert_eq!(responses.len(), 5);
    assert_eq!(responses[0]["error"]["error_code"], "E4001");
    assert_eq!(responses[1]["error"]["error_code"], "E1003");
    assert_eq!(responses[2]["ok"], true);
    assert_eq!(responses[3]["error"]["error_code"], "E2005");
    assert_eq!(responses[4]["ok"], true);
}
