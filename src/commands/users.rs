// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::{delete_user, list_users, save_state, user_exists};
use crate::models::LedgerState;
use crate::utils::{DEFAULT_USER, get_current_user, pretty_table, set_current_user};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = user_name(sub)?;
            if user_exists(conn, &name)? {
                return Err(anyhow!("User '{}' already exists", name));
            }
            save_state(conn, &name, &mut LedgerState::default())?;
            println!("Added user '{}'", name);
        }
        Some(("use", sub)) => {
            let name = user_name(sub)?;
            if !user_exists(conn, &name)? {
                return Err(anyhow!("User '{}' not found", name));
            }
            set_current_user(conn, &name)?;
            println!("Now using ledger of '{}'", name);
        }
        Some(("list", _)) => {
            let current = get_current_user(conn)?;
            let data = list_users(conn)?
                .into_iter()
                .map(|u| {
                    let mark = if u == current { "*" } else { "" };
                    vec![mark.to_string(), u]
                })
                .collect();
            println!("{}", pretty_table(&["", "User"], data));
        }
        Some(("rm", sub)) => {
            let name = user_name(sub)?;
            if delete_user(conn, &name)? {
                if get_current_user(conn)? == name {
                    set_current_user(conn, DEFAULT_USER)?;
                }
                println!("Removed user '{}'", name);
            } else {
                println!("No user named '{}'", name);
            }
        }
        _ => {}
    }
    Ok(())
}

fn user_name(sub: &clap::ArgMatches) -> Result<String> {
    let name = sub.get_one::<String>("name").unwrap().trim();
    if name.is_empty() {
        return Err(anyhow!("User name must not be empty"));
    }
    Ok(name.to_string())
}
