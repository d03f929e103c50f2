// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::balance;
use crate::budget::status_report;
use crate::commands::budgets::{STATUS_HEADERS, status_rows};
use crate::db::load_state;
use crate::utils::{
    fmt_money, get_currency_symbol, get_last_export, pretty_table, reference_date,
};
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;

pub const RECENT_COUNT: usize = 5;
pub const BACKUP_INTERVAL_DAYS: i64 = 7;

/// True when nothing was ever exported or the last export is older than a week.
pub fn backup_due(last_export: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_export {
        Some(at) => now - at > Duration::days(BACKUP_INTERVAL_DAYS),
        None => true,
    }
}

pub fn handle(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let state = load_state(conn, user)?;
    let today = reference_date(sub)?;
    let sym = get_currency_symbol(conn)?;
    let txs = state.transactions.list();

    println!("Ledger: {}", user);
    println!("Balance: {}", fmt_money(&balance(txs), &sym));

    let recent = state
        .transactions
        .recent(RECENT_COUNT)
        .iter()
        .map(|t| {
            let label = t.category().unwrap_or(&t.notes).to_string();
            let amt = t
                .amount
                .map(|a| fmt_money(&a, &sym))
                .unwrap_or_else(|| "?".into());
            vec![t.date.clone(), amt, label, t.kind.to_string()]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Amount", "Category / Notes", "Type"], recent)
    );

    let budgets = status_report(&state.budgets, txs, today);
    if !budgets.is_empty() {
        println!("{}", pretty_table(&STATUS_HEADERS, status_rows(&budgets, &sym)));
    }

    if backup_due(get_last_export(conn)?, Utc::now()) {
        println!("Remember to export your data for backup! (pursebook export snapshot --out FILE)");
    }
    Ok(())
}
