// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::load_state;
use crate::snapshot;
use crate::utils::record_last_export;
use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use rusqlite::Connection;
use serde_json::{Number, Value, json};

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("snapshot", sub)) => export_snapshot(conn, user, sub),
        Some(("transactions", sub)) => export_transactions(conn, user, sub),
        _ => Ok(()),
    }
}

fn export_snapshot(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap().trim();
    let state = load_state(conn, user)?;
    let bytes = snapshot::export(&state)?;
    std::fs::write(out, bytes).with_context(|| format!("Write snapshot {}", out))?;
    record_last_export(conn, Utc::now())?;
    tracing::info!(user, path = out, "snapshot exported");
    println!("Exported ledger for {} to {}", user, out);
    Ok(())
}

fn export_transactions(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let state = load_state(conn, user)?;
    let rows = state.transactions.list().iter().map(|t| {
        (
            t.date.clone(),
            t.kind.to_string(),
            t.amount.map(|a| a.to_string()).unwrap_or_default(),
            t.category().unwrap_or_default().to_string(),
            t.notes.clone(),
        )
    });

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "type", "amount", "category", "notes"])?;
            for (d, k, amt, cat, notes) in rows {
                wtr.write_record([d, k, amt, cat, notes])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .map(|(d, k, amt, cat, notes)| {
                    let amt = amt.parse::<Number>().map(Value::Number).unwrap_or(Value::Null);
                    json!({ "date": d, "type": k, "amount": amt, "category": cat, "notes": notes })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => return Err(anyhow!("Unknown format: {} (use csv|json)", fmt)),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
