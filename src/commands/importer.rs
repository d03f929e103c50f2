// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::save_state;
use crate::snapshot;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("snapshot", sub)) => import_snapshot(conn, user, sub),
        _ => Ok(()),
    }
}

// The stored ledger is only replaced once the whole file has decoded.
fn import_snapshot(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let bytes = std::fs::read(path).with_context(|| format!("Open snapshot {}", path))?;
    let mut state =
        snapshot::import(&bytes).with_context(|| format!("Import snapshot {}", path))?;
    save_state(conn, user, &mut state)?;
    tracing::info!(user, path, transactions = state.transactions.len(), "snapshot imported");
    println!(
        "Imported {} transactions, {} budgets, {} goals from {}",
        state.transactions.len(),
        state.budgets.len(),
        state.goals.len(),
        path
    );
    Ok(())
}
