// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate, Utc};
use pursebook::commands::{dashboard, exporter, importer};
use pursebook::{Transaction, cli, db, utils};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn seed(conn: &Connection, user: &str) {
    let mut state = db::load_state(conn, user).unwrap();
    let day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
    state
        .transactions
        .append(Transaction::expense(Decimal::new(1234, 2), "Groceries", day, "Weekly run"));
    state.budgets.insert("Groceries".into(), Decimal::from(300));
    state.goals.insert("car".into(), json!({ "target": 5000 }));
    db::save_state(conn, user, &mut state).unwrap();
}

fn group(args: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["pursebook"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    matches.subcommand().unwrap().1.clone()
}

#[test]
fn export_snapshot_writes_state_and_records_time() {
    let conn = base_conn();
    seed(&conn, "alice");
    assert!(utils::get_last_export(&conn).unwrap().is_none());

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("finance-data.json");
    let out_str = out_path.to_string_lossy().to_string();
    exporter::handle(&conn, "alice", &group(&["export", "snapshot", "--out", &out_str])).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(
        parsed,
        json!({
            "transactions": [{
                "type": "expense",
                "amount": 12.34,
                "category": "Groceries",
                "date": "2025-01-02",
                "notes": "Weekly run"
            }],
            "budgets": { "Groceries": 300 },
            "goals": { "car": { "target": 5000 } }
        })
    );
    assert!(utils::get_last_export(&conn).unwrap().is_some());
}

#[test]
fn snapshot_restores_into_another_user() {
    let conn = base_conn();
    seed(&conn, "alice");
    let dir = tempdir().unwrap();
    let out_str = dir.path().join("snap.json").to_string_lossy().to_string();
    exporter::handle(&conn, "alice", &group(&["export", "snapshot", "--out", &out_str])).unwrap();

    importer::handle(&conn, "bob", &group(&["import", "snapshot", "--path", &out_str])).unwrap();
    assert_eq!(
        db::load_state(&conn, "bob").unwrap(),
        db::load_state(&conn, "alice").unwrap()
    );
}

#[test]
fn import_replaces_wholesale_with_defaults() {
    let conn = base_conn();
    seed(&conn, "alice");

    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "transactions": [] }}"#).unwrap();
    file.flush().unwrap();
    let path = file.path().to_str().unwrap().to_string();
    importer::handle(&conn, "alice", &group(&["import", "snapshot", "--path", &path])).unwrap();

    let state = db::load_state(&conn, "alice").unwrap();
    assert!(state.transactions.is_empty());
    assert!(state.budgets.is_empty());
    assert!(state.goals.is_empty());
}

#[test]
fn failed_import_leaves_state_untouched() {
    let conn = base_conn();
    seed(&conn, "alice");
    let before = db::load_state(&conn, "alice").unwrap();

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "this is not json").unwrap();
    file.flush().unwrap();
    let padded = format!("  {}  ", file.path().to_str().unwrap());
    let res = importer::handle(&conn, "alice", &group(&["import", "snapshot", "--path", &padded]));
    assert!(res.is_err());
    assert_eq!(db::load_state(&conn, "alice").unwrap(), before);
}

#[test]
fn export_transactions_as_csv() {
    let conn = base_conn();
    seed(&conn, "alice");
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("tx.csv");
    let out_str = out_path.to_string_lossy().to_string();
    exporter::handle(
        &conn,
        "alice",
        &group(&["export", "transactions", "--format", "CSV", "--out", &out_str]),
    )
    .unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "date,type,amount,category,notes");
    assert_eq!(lines[1], "2025-01-02,expense,12.34,Groceries,Weekly run");
    assert!(utils::get_last_export(&conn).unwrap().is_none());
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();
    let res = exporter::handle(
        &conn,
        "alice",
        &group(&["export", "transactions", "--format", "xml", "--out", &out_str]),
    );
    assert!(res.is_err());
    assert!(!out_path.exists());
}

#[test]
fn backup_reminder_after_a_week() {
    let now = Utc::now();
    assert!(dashboard::backup_due(None, now));
    assert!(!dashboard::backup_due(Some(now - Duration::days(2)), now));
    assert!(dashboard::backup_due(Some(now - Duration::days(8)), now));

    let conn = base_conn();
    utils::record_last_export(&conn, now - Duration::hours(1)).unwrap();
    let stored = utils::get_last_export(&conn).unwrap().unwrap();
    assert!(!dashboard::backup_due(Some(stored), now));
}

#[test]
fn json_transaction_export_writes_numeric_amounts() {
    let conn = base_conn();
    seed(&conn, "alice");
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("transactions.json");
    let out_str = out_path.to_string_lossy().to_string();
    exporter::handle(
        &conn,
        "alice",
        &group(&["export", "transactions", "--out", &out_str]),
    )
    .unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(parsed[0]["amount"], json!(12.34));
    assert_eq!(parsed[0]["category"], "Groceries");
}
