// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveDate, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::sync::Once;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_USER: &str = "default";

const KEY_CURRENCY: &str = "currency_symbol";
const KEY_CURRENT_USER: &str = "current_user";
const KEY_LAST_EXPORT: &str = "last_export";

static TRACING_INIT: Once = Once::new();

/// Installs the stderr subscriber once. `RUST_LOG` overrides the default level.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("pursebook=warn"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(anyhow!("Amount '{}' must not be negative", s));
    }
    Ok(d)
}

/// The `--as-of` argument if given, else the local calendar date.
pub fn reference_date(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.try_get_one::<String>("as_of").ok().flatten() {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

/// Two fixed decimals. Padding is done on the plain string since precision
/// formatting overflows for values near the `Decimal` bounds.
pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    let amount = d.round_dp(2).to_string();
    let decimals = amount.split_once('.').map_or(0, |(_, frac)| frac.len());
    let dot = if decimals == 0 { "." } else { "" };
    format!("{}{}{}{}", symbol, amount, dot, "0".repeat(2 - decimals))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

// Display-only currency symbol
pub fn get_currency_symbol(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, KEY_CURRENCY)?.unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()))
}

pub fn set_currency_symbol(conn: &Connection, symbol: &str) -> Result<()> {
    set_setting(conn, KEY_CURRENCY, symbol)
}

pub fn get_current_user(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, KEY_CURRENT_USER)?.unwrap_or_else(|| DEFAULT_USER.to_string()))
}

pub fn set_current_user(conn: &Connection, user: &str) -> Result<()> {
    set_setting(conn, KEY_CURRENT_USER, user)
}

/// `--user` on the command line wins over the stored current user.
pub fn resolve_user(conn: &Connection, explicit: Option<&str>) -> Result<String> {
    match explicit.map(str::trim).filter(|u| !u.is_empty()) {
        Some(u) => Ok(u.to_string()),
        None => get_current_user(conn),
    }
}

pub fn get_last_export(conn: &Connection) -> Result<Option<DateTime<Utc>>> {
    let Some(raw) = get_setting(conn, KEY_LAST_EXPORT)? else {
        return Ok(None);
    };
    let at = DateTime::parse_from_rfc3339(&raw)
        .with_context(|| format!("Invalid last export timestamp '{}'", raw))?;
    Ok(Some(at.with_timezone(&Utc)))
}

pub fn record_last_export(conn: &Connection, at: DateTime<Utc>) -> Result<()> {
    set_setting(conn, KEY_LAST_EXPORT, &at.to_rfc3339())
}
