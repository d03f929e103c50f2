// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pursebook::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let user = utils::resolve_user(&conn, matches.get_one::<String>("user").map(|s| s.as_str()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("user", sub)) => commands::users::handle(&conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &user, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, &user, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &user, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &user, sub)?,
        Some(("import", sub)) => commands::importer::handle(&conn, &user, sub)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, &user, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
