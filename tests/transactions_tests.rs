// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pursebook::budget::BudgetCheck;
use pursebook::commands::{budgets, transactions, users};
use pursebook::{Kind, cli, db, utils};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

/// Matches of the innermost subcommand, e.g. `tx expense ...`.
fn leaf(args: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["pursebook"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    let (_, group) = matches.subcommand().unwrap();
    let (_, sub) = group.subcommand().unwrap();
    sub.clone()
}

fn group(args: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["pursebook"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    matches.subcommand().unwrap().1.clone()
}

#[test]
fn expense_over_budget_reports_overrun() {
    let conn = setup();
    budgets::handle(&conn, "alice", &group(&["budget", "set", "groceries", "180"])).unwrap();

    let first = transactions::add_expense(
        &conn,
        "alice",
        &leaf(&[
            "tx", "expense", "--amount", "120", "--category", "groceries", "--date", "2024-01-10",
            "--as-of", "2024-01-15",
        ]),
    )
    .unwrap();
    assert_eq!(first, BudgetCheck::Ok);

    let second = transactions::add_expense(
        &conn,
        "alice",
        &leaf(&[
            "tx", "expense", "--amount", "80", "--category", "groceries", "--date", "2024-01-12",
            "--as-of", "2024-01-15",
        ]),
    )
    .unwrap();
    match second {
        BudgetCheck::Overrun(o) => {
            assert_eq!(o.spent, Decimal::from(200));
            assert_eq!(o.limit, Decimal::from(180));
        }
        BudgetCheck::Ok => panic!("expected overrun"),
    }

    let state = db::load_state(&conn, "alice").unwrap();
    assert_eq!(state.transactions.len(), 2);
    assert!(!state.transactions.is_dirty());
}

#[test]
fn income_defaults_notes_to_salary() {
    let conn = setup();
    transactions::handle(
        &conn,
        "bob",
        &group(&["tx", "income", "--amount", "3000", "--date", "2024-03-01"]),
    )
    .unwrap();
    let state = db::load_state(&conn, "bob").unwrap();
    let t = &state.transactions.list()[0];
    assert_eq!(t.kind, Kind::Income);
    assert_eq!(t.notes, "Salary");
    assert_eq!(t.category(), None);
}

#[test]
fn negative_amount_is_rejected() {
    let conn = setup();
    let res = transactions::handle(
        &conn,
        "bob",
        &group(&["tx", "income", "--amount=-5", "--date", "2024-03-01"]),
    );
    assert!(res.is_err());
    assert!(db::load_state(&conn, "bob").unwrap().transactions.is_empty());
}

#[test]
fn list_search_and_limit_respected() {
    let conn = setup();
    for (i, cat) in ["Rent", "Food", "food truck", "Fuel"].iter().enumerate() {
        let date = format!("2025-01-0{}", i + 1);
        transactions::handle(
            &conn,
            "carol",
            &group(&[
                "tx", "expense", "--amount", "10", "--category", *cat, "--date", date.as_str(),
            ]),
        )
        .unwrap();
    }
    let state = db::load_state(&conn, "carol").unwrap();

    let rows = transactions::query_rows(&state, &leaf(&["tx", "list", "--search", "FOOD"]));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "Food");

    let rows = transactions::query_rows(&state, &leaf(&["tx", "list", "--limit", "2"]));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
    assert_eq!(rows[1].date, "2025-01-04");
}

#[test]
fn ledgers_are_scoped_per_user() {
    let conn = setup();
    users::handle(&conn, &group(&["user", "add", "dana"])).unwrap();
    users::handle(&conn, &group(&["user", "add", "eli"])).unwrap();
    assert!(users::handle(&conn, &group(&["user", "add", "dana"])).is_err());
    assert!(users::handle(&conn, &group(&["user", "use", "nobody"])).is_err());

    users::handle(&conn, &group(&["user", "use", "eli"])).unwrap();
    let user = utils::resolve_user(&conn, None).unwrap();
    assert_eq!(user, "eli");
    assert_eq!(utils::resolve_user(&conn, Some("dana")).unwrap(), "dana");

    transactions::handle(
        &conn,
        &user,
        &group(&["tx", "income", "--amount", "10", "--date", "2024-03-01"]),
    )
    .unwrap();
    assert_eq!(db::load_state(&conn, "eli").unwrap().transactions.len(), 1);
    assert!(db::load_state(&conn, "dana").unwrap().transactions.is_empty());
    assert_eq!(db::list_users(&conn).unwrap(), ["dana", "eli"]);

    users::handle(&conn, &group(&["user", "rm", "dana"])).unwrap();
    assert_eq!(db::list_users(&conn).unwrap(), ["eli"]);
}

#[test]
fn budget_status_uses_as_of_month() {
    let conn = setup();
    budgets::handle(&conn, "fay", &group(&["budget", "set", "fun", "0"])).unwrap();
    budgets::handle(&conn, "fay", &group(&["budget", "set", "rent", "1000"])).unwrap();
    transactions::handle(
        &conn,
        "fay",
        &group(&[
            "tx", "expense", "--amount", "250", "--category", "rent", "--date", "2024-05-01",
        ]),
    )
    .unwrap();

    let rows =
        budgets::query_status(&conn, "fay", &leaf(&["budget", "status", "--as-of", "2024-05-20"]))
            .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "fun");
    assert_eq!(rows[0].ratio, Decimal::ZERO);
    assert_eq!(rows[1].spent, Decimal::from(250));
    assert_eq!(rows[1].ratio, "0.25".parse::<Decimal>().unwrap());

    let rows =
        budgets::query_status(&conn, "fay", &leaf(&["budget", "status", "--as-of", "2024-06-02"]))
            .unwrap();
    assert_eq!(rows[1].spent, Decimal::ZERO);

    budgets::handle(&conn, "fay", &group(&["budget", "rm", "fun"])).unwrap();
    assert_eq!(db::load_state(&conn, "fay").unwrap().budgets.len(), 1);
}

#[test]
fn removing_the_current_user_falls_back_to_default() {
    let conn = setup();
    users::handle(&conn, &group(&["user", "add", "gus"])).unwrap();
    users::handle(&conn, &group(&["user", "use", "gus"])).unwrap();
    assert_eq!(utils::resolve_user(&conn, None).unwrap(), "gus");

    users::handle(&conn, &group(&["user", "rm", "gus"])).unwrap();
    assert_eq!(utils::resolve_user(&conn, None).unwrap(), utils::DEFAULT_USER);
    assert!(db::list_users(&conn).unwrap().is_empty());
}

#[test]
fn blank_budget_category_is_rejected() {
    let conn = setup();
    assert!(budgets::handle(&conn, "hal", &group(&["budget", "set", "  ", "10"])).is_err());
    assert!(db::load_state(&conn, "hal").unwrap().budgets.is_empty());
}
