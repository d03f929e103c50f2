// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{balance, category_breakdown, monthly_breakdown};
use crate::db::load_state;
use crate::models::Kind;
use crate::utils::{fmt_money, get_currency_symbol, maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => show_balance(conn, user, sub)?,
        Some(("monthly", sub)) => monthly(conn, user, sub)?,
        Some(("categories", sub)) => categories(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn show_balance(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let state = load_state(conn, user)?;
    let bal = balance(state.transactions.list());
    let sym = get_currency_symbol(conn)?;
    let v = json!({ "user": user, "balance": bal });
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &v)? {
        println!("Balance: {}", fmt_money(&bal, &sym));
    }
    Ok(())
}

fn monthly(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let state = load_state(conn, user)?;
    let buckets = monthly_breakdown(state.transactions.list());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &buckets)? {
        let sym = get_currency_symbol(conn)?;
        let data = buckets
            .iter()
            .map(|b| {
                vec![
                    b.month.to_string(),
                    fmt_money(&b.totals.income, &sym),
                    fmt_money(&b.totals.expense, &sym),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], data));
    }
    Ok(())
}

fn categories(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let kind: Kind = sub
        .get_one::<String>("kind")
        .map(|s| s.as_str())
        .unwrap_or("expense")
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let state = load_state(conn, user)?;
    let agg = category_breakdown(state.transactions.list(), kind);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &agg)? {
        let sym = get_currency_symbol(conn)?;
        let mut items: Vec<_> = agg.into_iter().collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        let data = items
            .into_iter()
            .map(|(cat, amt)| vec![cat, fmt_money(&amt, &sym)])
            .collect();
        println!("{}", pretty_table(&["Category", "Total"], data));
    }
    Ok(())
}
