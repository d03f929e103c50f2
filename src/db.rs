// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, Result as LedgerResult};
use crate::models::LedgerState;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pursebook", "pursebook"));

pub const DB_ENV: &str = "PURSEBOOK_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pursebook.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> LedgerResult<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    -- one JSON document {transactions, budgets, goals} per user
    CREATE TABLE IF NOT EXISTS ledgers(
        user TEXT PRIMARY KEY,
        state TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

/// Reads the whole ledger for `user`. An unknown user reads as an empty ledger.
pub fn load_state(conn: &Connection, user: &str) -> LedgerResult<LedgerState> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT state FROM ledgers WHERE user=?1",
            params![user],
            |r| r.get(0),
        )
        .optional()?;
    let state = match raw {
        Some(s) => serde_json::from_str(&s).map_err(LedgerError::Decode)?,
        None => LedgerState::default(),
    };
    tracing::debug!(user, transactions = state.transactions.len(), "ledger loaded");
    Ok(state)
}

/// Replaces the stored ledger for `user` with `state`.
pub fn save_state(conn: &Connection, user: &str, state: &mut LedgerState) -> LedgerResult<()> {
    let json = serde_json::to_string(state).map_err(LedgerError::Encode)?;
    conn.execute(
        "INSERT INTO ledgers(user, state) VALUES (?1, ?2)
         ON CONFLICT(user) DO UPDATE SET state=excluded.state, updated_at=datetime('now')",
        params![user, json],
    )?;
    state.transactions.mark_clean();
    tracing::debug!(user, transactions = state.transactions.len(), "ledger saved");
    Ok(())
}

pub fn user_exists(conn: &Connection, user: &str) -> LedgerResult<bool> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM ledgers WHERE user=?1", params![user], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(found.is_some())
}

pub fn list_users(conn: &Connection) -> LedgerResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT user FROM ledgers ORDER BY user")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn delete_user(conn: &Connection, user: &str) -> LedgerResult<bool> {
    let n = conn.execute("DELETE FROM ledgers WHERE user=?1", params![user])?;
    Ok(n > 0)
}
