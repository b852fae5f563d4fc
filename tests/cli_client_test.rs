//! Integration tests for client and note commands via the CLI.
//!
//! Covers `pw system init`, client CRUD, the notes direct-edit path, and
//! the per-client summary.

mod common;

use common::TestEnv;
use predicates::prelude::*;

// === Init Tests ===

#[test]
fn test_init_creates_storage() {
    let env = TestEnv::new();

    env.pw()
        .args(["system", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"initialized\":true"));

    assert!(env.data_dir.path().join("clients.json").exists());
    assert!(env.data_dir.path().join("orders.json").exists());
    assert!(env.data_dir.path().join("notes.json").exists());
}

#[test]
fn test_init_already_initialized() {
    let env = TestEnv::init();

    env.pw()
        .args(["system", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"initialized\":false"));
}

#[test]
fn test_commands_require_init() {
    let env = TestEnv::new();

    env.pw()
        .args(["client", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not initialized"));
}

#[test]
fn test_system_status_counts() {
    let env = TestEnv::init();
    env.json(&["client", "add", "Acme Print Co"]);

    let status = env.json(&["system", "status"]);
    assert_eq!(status["collections"]["clients"], 1);
    assert_eq!(status["collections"]["orders"], 0);
}

#[test]
fn test_system_statuses_prints_catalog() {
    let env = TestEnv::init();

    env.pw()
        .args(["system", "statuses", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quote"))
        .stdout(predicate::str::contains("shipped"));
}

// === Client Tests ===

#[test]
fn test_client_add_and_show() {
    let env = TestEnv::init();

    let client = env.json(&[
        "client",
        "add",
        "Acme Print Co",
        "--email",
        "ops@acme.test",
        "--tag",
        "wholesale",
    ]);
    let id = client["id"].as_str().unwrap();
    assert!(id.starts_with("pwc-"));
    assert_eq!(client["email"], "ops@acme.test");

    let shown = env.json(&["client", "show", id]);
    assert_eq!(shown["name"], "Acme Print Co");
    assert_eq!(shown["tags"][0], "wholesale");
}

#[test]
fn test_client_add_with_portal_code() {
    let env = TestEnv::init();

    let client = env.json(&["client", "add", "Acme", "--portal"]);
    assert!(client["portal_access_code"].as_str().unwrap().len() > 10);
}

#[test]
fn test_client_update_merges_patch() {
    let env = TestEnv::init();
    let client = env.json(&["client", "add", "Acme", "--email", "old@acme.test"]);
    let id = client["id"].as_str().unwrap();

    let updated = env.json(&["client", "update", id, "--patch", r#"{"phone":"555-0100"}"#]);
    assert_eq!(updated["phone"], "555-0100");
    // Absent fields stay.
    assert_eq!(updated["email"], "old@acme.test");
}

#[test]
fn test_client_update_unknown_id_reports_not_found() {
    let env = TestEnv::init();

    let report = env.json(&["client", "update", "pwc-zzzz", "--patch", r#"{"name":"X"}"#]);
    assert_eq!(report["found"], false);
}

#[test]
fn test_client_delete_keeps_references() {
    let env = TestEnv::init();
    let client = env.json(&["client", "add", "Acme"]);
    let id = client["id"].as_str().unwrap().to_string();
    env.json(&["order", "add", "ORD-1", &id]);

    env.json(&["client", "delete", &id]);

    let clients = env.json(&["client", "list"]);
    assert_eq!(clients.as_array().unwrap().len(), 0);
    // The order keeps its dangling client id.
    let orders = env.json(&["order", "list"]);
    assert_eq!(orders[0]["client_id"], id.as_str());
}

#[test]
fn test_summary_aggregates_client_data() {
    let env = TestEnv::init();
    let client = env.json(&["client", "add", "Acme"]);
    let id = client["id"].as_str().unwrap().to_string();

    env.json(&["order", "add", "ORD-1", &id, "--total", "110"]);
    env.json(&["task", "add", "Proof", "--client", &id]);
    env.json(&["bid", "add", "BID-1", &id, "--total", "50"]);

    let summary = env.json(&["summary", &id]);
    assert_eq!(summary["project_count"], 1);
    assert_eq!(summary["task_count"], 1);
    assert_eq!(summary["bid_count"], 1);
    assert_eq!(summary["total_revenue"], 110.0);
    assert_eq!(summary["pending_tasks"], 1);
    assert_eq!(summary["active_bids"], 1);
}

#[test]
fn test_summary_unknown_client_fails() {
    let env = TestEnv::init();

    env.pw()
        .args(["summary", "pwc-zzzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Client not found"));
}

// === Note Tests ===

#[test]
fn test_note_add_list_delete() {
    let env = TestEnv::init();

    let note = env.json(&[
        "note",
        "add",
        "Stock reminder",
        "Order more 350gsm stock",
        "--pin",
    ]);
    let id = note["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("pwn-"));
    assert_eq!(note["is_pinned"], true);

    let notes = env.json(&["note", "list"]);
    assert_eq!(notes.as_array().unwrap().len(), 1);

    env.json(&["note", "delete", &id]);
    let notes = env.json(&["note", "list"]);
    assert_eq!(notes.as_array().unwrap().len(), 0);
}
