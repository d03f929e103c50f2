// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn as_of() -> Arg {
    Arg::new("as_of")
        .long("as-of")
        .value_name("YYYY-MM-DD")
        .help("Reference date for budget checks (defaults to today)")
}

pub fn build_cli() -> Command {
    Command::new("pursebook")
        .version(clap::crate_version!())
        .about("Personal income/expense ledger with monthly category budgets")
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("Ledger owner for this invocation (defaults to the current user)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("user")
                .about("Manage ledger owners")
                .subcommand(Command::new("add").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("use").arg(Arg::new("name").required(true)))
                .subcommand(Command::new("list"))
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("expense")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(as_of()),
                )
                .subcommand(
                    Command::new("income")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("recent").arg(
                        Arg::new("count")
                            .long("count")
                            .value_parser(value_parser!(usize))
                            .default_value("5"),
                    ),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending limits per category")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("category").required(true)))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(Command::new("status").arg(as_of()))),
        )
        .subcommand(
            Command::new("report")
                .about("Balance, monthly and per-category totals")
                .subcommand(json_flags(Command::new("balance")))
                .subcommand(json_flags(Command::new("monthly")))
                .subcommand(json_flags(
                    Command::new("categories").arg(
                        Arg::new("kind")
                            .long("kind")
                            .value_parser(["income", "expense"])
                            .default_value("expense"),
                    ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write a snapshot or a transaction listing")
                .subcommand(
                    Command::new("snapshot").arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("json")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Restore a snapshot, replacing the current ledger")
                .subcommand(
                    Command::new("snapshot").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Display settings")
                .subcommand(Command::new("currency").arg(Arg::new("symbol"))),
        )
        .subcommand(Command::new("dashboard").about("Balance, recent entries and budgets").arg(as_of()))
}
