// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::{BudgetStatus, status_report};
use crate::db::{load_state, save_state};
use crate::utils::{
    fmt_money, get_currency_symbol, maybe_print_json, parse_amount, pretty_table, reference_date,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, user, sub)?,
        Some(("rm", sub)) => remove(conn, user, sub)?,
        Some(("list", sub)) => list(conn, user, sub)?,
        Some(("status", sub)) => status(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap().trim().to_string();
    if cat.is_empty() {
        return Err(anyhow!("Category must not be empty"));
    }
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let mut state = load_state(conn, user)?;
    state.budgets.insert(cat.clone(), amount);
    save_state(conn, user, &mut state)?;
    println!("Budget set for {} = {}", cat, amount);
    Ok(())
}

fn remove(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let cat = sub.get_one::<String>("category").unwrap().trim();
    let mut state = load_state(conn, user)?;
    if state.budgets.remove(cat).is_some() {
        save_state(conn, user, &mut state)?;
        println!("Removed budget for {}", cat);
    } else {
        println!("No budget set for {}", cat);
    }
    Ok(())
}

fn list(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let state = load_state(conn, user)?;
    let sym = get_currency_symbol(conn)?;
    let data: Vec<Vec<String>> = state
        .budgets
        .iter()
        .map(|(c, a)| vec![c.clone(), fmt_money(a, &sym)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &state.budgets)? {
        println!("{}", pretty_table(&["Category", "Monthly limit"], data));
    }
    Ok(())
}

/// Spent, limit and progress for every budgeted category in the reference month.
pub fn query_status(
    conn: &Connection,
    user: &str,
    sub: &clap::ArgMatches,
) -> Result<Vec<BudgetStatus>> {
    let state = load_state(conn, user)?;
    let today = reference_date(sub)?;
    Ok(status_report(&state.budgets, state.transactions.list(), today))
}

pub fn status_rows(data: &[BudgetStatus], sym: &str) -> Vec<Vec<String>> {
    data.iter()
        .map(|s| {
            let pct = s.ratio.saturating_mul(Decimal::ONE_HUNDRED).round_dp(0);
            vec![
                s.category.clone(),
                fmt_money(&s.limit, sym),
                fmt_money(&s.spent, sym),
                format!("{}%", pct),
                if s.overrun { "OVER".into() } else { String::new() },
            ]
        })
        .collect()
}

pub const STATUS_HEADERS: [&str; 5] = ["Category", "Budget", "Spent", "Progress", ""];

fn status(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_status(conn, user, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let sym = get_currency_symbol(conn)?;
        println!("{}", pretty_table(&STATUS_HEADERS, status_rows(&data, &sym)));
    }
    Ok(())
}
