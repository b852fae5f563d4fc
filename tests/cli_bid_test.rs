//! Integration tests for bid commands via the CLI, centered on the
//! acceptance conversion: one new order plus one kickoff task, exactly
//! once, with the bid kept as the audit trail.

mod common;

use common::TestEnv;
use predicates::prelude::*;

fn add_bid(env: &TestEnv) -> (String, String) {
    let client = env.json(&["client", "add", "Acme"]);
    let client_id = client["id"].as_str().unwrap().to_string();
    let bid = env.json(&[
        "bid",
        "add",
        "BID-7",
        &client_id,
        "--subtotal",
        "20",
        "--tax",
        "2",
        "--total",
        "22",
    ]);
    (bid["id"].as_str().unwrap().to_string(), client_id)
}

#[test]
fn test_bid_add_defaults_to_draft() {
    let env = TestEnv::init();
    let (bid_id, _) = add_bid(&env);

    let bid = env.json(&["bid", "show", &bid_id]);
    assert_eq!(bid["status"], "draft");
    assert_eq!(bid["total"], 22.0);
}

#[test]
fn test_bid_accept_creates_order_and_task() {
    let env = TestEnv::init();
    let (bid_id, client_id) = add_bid(&env);

    let report = env.json(&["bid", "accept", &bid_id]);
    assert_eq!(report["accepted"], bid_id.as_str());
    assert_eq!(report["order"]["bid_id"], bid_id.as_str());

    let orders = env.json(&["order", "list"]);
    assert_eq!(orders.as_array().unwrap().len(), 1);
    let order = &orders[0];
    assert_eq!(order["client_id"], client_id.as_str());
    assert_eq!(order["status"], "pending");
    assert_eq!(order["pricing"]["total"], 22.0);
    assert_eq!(order["pricing"]["paid"], 0.0);

    let tasks = env.json(&["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    let task = &tasks[0];
    assert_eq!(task["priority"], "high");
    assert_eq!(task["project_id"], order["id"]);
    assert_eq!(task["client_id"], client_id.as_str());
    assert!(task["due_date"].is_string());
}

#[test]
fn test_bid_accept_fires_exactly_once() {
    let env = TestEnv::init();
    let (bid_id, _) = add_bid(&env);

    env.json(&["bid", "accept", &bid_id]);
    env.json(&["bid", "accept", &bid_id]);
    env.json(&["bid", "update", &bid_id, "--patch", r#"{"tags":["rush"]}"#]);

    let orders = env.json(&["order", "list"]);
    assert_eq!(orders.as_array().unwrap().len(), 1);
    let tasks = env.json(&["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 1);

    // The bid is never deleted by conversion.
    let bids = env.json(&["bid", "list"]);
    assert_eq!(bids.as_array().unwrap().len(), 1);
    assert_eq!(bids[0]["status"], "accepted");
}

#[test]
fn test_bid_accept_via_update_patch() {
    let env = TestEnv::init();
    let (bid_id, _) = add_bid(&env);

    env.json(&["bid", "update", &bid_id, "--patch", r#"{"status":"accepted"}"#]);

    let orders = env.json(&["order", "list"]);
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[test]
fn test_bid_accept_unknown_id_fails() {
    let env = TestEnv::init();

    env.pw()
        .args(["bid", "accept", "pwb-zzzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bid not found"));
}

#[test]
fn test_bid_list_filters_by_status() {
    let env = TestEnv::init();
    let (bid_id, client_id) = add_bid(&env);
    env.json(&["bid", "add", "BID-8", &client_id]);
    env.json(&["bid", "accept", &bid_id]);

    let drafts = env.json(&["bid", "list", "--status", "draft"]);
    assert_eq!(drafts.as_array().unwrap().len(), 1);
    assert_eq!(drafts[0]["bid_number"], "BID-8");

    let for_client = env.json(&["bid", "list", "--client", &client_id]);
    assert_eq!(for_client.as_array().unwrap().len(), 2);
}
