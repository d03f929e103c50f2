// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::{self, BudgetCheck};
use crate::db::{load_state, save_state};
use crate::models::{LedgerState, Transaction};
use crate::utils::{
    fmt_money, get_currency_symbol, maybe_print_json, parse_amount, parse_date, pretty_table,
    reference_date,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

const DEFAULT_INCOME_NOTES: &str = "Salary";

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expense", sub)) => {
            let check = add_expense(conn, user, sub)?;
            if let BudgetCheck::Overrun(o) = check {
                let sym = get_currency_symbol(conn)?;
                println!(
                    "Budget overrun for {}! Spent: {}, Budget: {}",
                    o.category,
                    fmt_money(&o.spent, &sym),
                    fmt_money(&o.limit, &sym)
                );
            }
        }
        Some(("income", sub)) => add_income(conn, user, sub)?,
        Some(("list", sub)) => list(conn, user, sub)?,
        Some(("recent", sub)) => recent(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

/// Records an expense and checks its category budget for the reference month.
pub fn add_expense(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<BudgetCheck> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let notes = sub.get_one::<String>("notes").cloned().unwrap_or_default();
    let today = reference_date(sub)?;

    let mut state = load_state(conn, user)?;
    state
        .transactions
        .append(Transaction::expense(amount, &category, date, notes));
    save_state(conn, user, &mut state)?;
    println!("Recorded expense {} on {} ({})", amount, date, category);

    Ok(budget::evaluate(
        &category,
        &state.budgets,
        state.transactions.list(),
        today,
    ))
}

fn add_income(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let notes = sub
        .get_one::<String>("notes")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_INCOME_NOTES)
        .to_string();

    let mut state = load_state(conn, user)?;
    state
        .transactions
        .append(Transaction::income(amount, date, notes));
    save_state(conn, user, &mut state)?;
    println!("Recorded income {} on {}", amount, date);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub notes: String,
}

impl TransactionRow {
    fn from_tx(t: &Transaction) -> Self {
        Self {
            date: t.date.clone(),
            kind: t.kind.to_string(),
            amount: t.amount.map(|a| a.to_string()).unwrap_or_default(),
            category: t.category().unwrap_or_default().to_string(),
            notes: t.notes.clone(),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.kind.clone(),
            self.amount.clone(),
            self.category.clone(),
            self.notes.clone(),
        ]
    }
}

const HEADERS: [&str; 5] = ["Date", "Type", "Amount", "Category", "Notes"];

/// Matches from `--search` in ledger order, keeping the last `--limit` of them.
pub fn query_rows(state: &LedgerState, sub: &clap::ArgMatches) -> Vec<TransactionRow> {
    let query = sub
        .get_one::<String>("search")
        .map(|s| s.as_str())
        .unwrap_or("");
    let hits = state.transactions.search(query);
    let start = match sub.get_one::<usize>("limit") {
        Some(limit) => hits.len().saturating_sub(*limit),
        None => 0,
    };
    hits[start..]
        .iter()
        .map(|t| TransactionRow::from_tx(t))
        .collect()
}

fn list(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let state = load_state(conn, user)?;
    let data = query_rows(&state, sub);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data.iter().map(TransactionRow::cells).collect();
        println!("{}", pretty_table(&HEADERS, rows));
    }
    Ok(())
}

fn recent(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let state = load_state(conn, user)?;
    let count = *sub.get_one::<usize>("count").unwrap_or(&5);
    let data: Vec<TransactionRow> = state
        .transactions
        .recent(count)
        .iter()
        .map(TransactionRow::from_tx)
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data.iter().map(TransactionRow::cells).collect();
        println!("{}", pretty_table(&HEADERS, rows));
    }
    Ok(())
}
