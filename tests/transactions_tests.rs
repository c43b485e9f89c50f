// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finsight::{cli, commands::transactions, db::init_schema};
use finsight::models::TxAmount;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let rows = [
        ("alice", "expense", "10", "Food", "Lunch", "2025-01-01"),
        ("alice", "expense", "25", "Transportation", "Train ticket", "2025-01-02"),
        ("alice", "income", "900", "Salary", "January pay", "2025-01-03"),
        ("bob", "expense", "5", "Food", "Snack", "2025-01-04"),
    ];
    for (owner, ty, amount, cat, desc, date) in rows {
        conn.execute(
            "INSERT INTO transactions(owner,type,amount,category,description,date,created_at)
             VALUES (?1,?2,?3,?4,?5,?6,'2025-01-01T00:00:00+00:00')",
            [owner, ty, amount, cat, desc, date],
        )
        .unwrap();
    }
    conn
}

fn run(conn: &Connection, args: &[&str]) -> Vec<finsight::models::Transaction> {
    let mut argv = vec!["finsight", "--owner", "alice", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            transactions::query_rows(conn, "alice", list_m).unwrap()
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_limit_respected_newest_first() {
    let conn = setup();
    let rows = run(&conn, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-01-03");
    assert_eq!(rows[1].date.to_string(), "2025-01-02");
}

#[test]
fn list_is_scoped_to_owner() {
    let conn = setup();
    let rows = run(&conn, &[]);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|t| t.owner == "alice"));
}

#[test]
fn list_filters_combine() {
    let conn = setup();
    let rows = run(&conn, &["--search", "TICKET"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Transportation");

    let rows = run(&conn, &["--type", "expense", "--from", "2025-01-01", "--to", "2025-01-01"]);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Lunch");

    let rows = run(&conn, &["--category", "Salary", "--type", "expense"]);
    assert!(rows.is_empty());
}

#[test]
fn half_open_date_range_is_rejected() {
    let conn = setup();
    let matches =
        cli::build_cli().get_matches_from(["finsight", "tx", "list", "--from", "2025-01-01"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    assert!(transactions::query_rows(&conn, "alice", list_m).is_err());
}

#[test]
fn add_edit_and_remove_through_handler() {
    let conn = setup();
    let add = cli::build_cli().get_matches_from([
        "finsight", "tx", "add", "--type", "expense", "--amount", "4.20", "--category",
        "Food", "--date", "2025-02-01", "--description", "Coffee",
    ]);
    let (_, tx_m) = add.subcommand().unwrap();
    transactions::handle(&conn, "carol", tx_m).unwrap();

    let rows = run_for(&conn, "carol");
    assert_eq!(rows.len(), 1);
    let id = rows[0].id.to_string();

    let edit = cli::build_cli().get_matches_from([
        "finsight", "tx", "edit", id.as_str(), "--amount", "5", "--category", "Entertainment",
    ]);
    let (_, tx_m) = edit.subcommand().unwrap();
    transactions::handle(&conn, "carol", tx_m).unwrap();
    let rows = run_for(&conn, "carol");
    assert_eq!(rows[0].category, "Entertainment");
    assert_eq!(rows[0].description, "Coffee");
    assert_eq!(rows[0].amount.valid(), Some(Decimal::new(5, 0)));

    // someone else cannot remove it
    let rm = cli::build_cli().get_matches_from(["finsight", "tx", "rm", id.as_str()]);
    let (_, tx_m) = rm.subcommand().unwrap();
    assert!(transactions::handle(&conn, "alice", tx_m).is_err());
    transactions::handle(&conn, "carol", tx_m).unwrap();
    assert!(run_for(&conn, "carol").is_empty());
}

#[test]
fn add_rejects_negative_amount() {
    let conn = setup();
    let add = cli::build_cli().get_matches_from([
        "finsight", "tx", "add", "--type", "expense", "--amount=-3", "--category", "Food",
        "--date", "2025-02-01",
    ]);
    let (_, tx_m) = add.subcommand().unwrap();
    assert!(transactions::handle(&conn, "carol", tx_m).is_err());
}

#[test]
fn edit_repairs_a_non_numeric_stored_amount() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(owner,type,amount,category,description,date,created_at)
         VALUES ('dave','expense','abc','Food','Typo','2025-01-05','2025-01-05T00:00:00+00:00')",
        [],
    )
    .unwrap();
    let rows = run_for(&conn, "dave");
    assert_eq!(rows[0].amount, TxAmount::Invalid("abc".into()));
    let id = rows[0].id.to_string();

    // keeping the stored amount is refused while it is unreadable
    let keep = cli::build_cli().get_matches_from([
        "finsight", "tx", "edit", id.as_str(), "--category", "Shopping",
    ]);
    let (_, tx_m) = keep.subcommand().unwrap();
    assert!(transactions::handle(&conn, "dave", tx_m).is_err());
    assert_eq!(run_for(&conn, "dave")[0].category, "Food");

    let fix = cli::build_cli().get_matches_from([
        "finsight", "tx", "edit", id.as_str(), "--amount", "5",
    ]);
    let (_, tx_m) = fix.subcommand().unwrap();
    transactions::handle(&conn, "dave", tx_m).unwrap();
    let rows = run_for(&conn, "dave");
    assert_eq!(rows[0].amount, TxAmount::Valid(Decimal::new(5, 0)));
    assert_eq!(rows[0].description, "Typo");
    assert!(rows[0].updated_at.is_some());
}

fn run_for(conn: &Connection, owner: &str) -> Vec<finsight::models::Transaction> {
    let matches = cli::build_cli().get_matches_from(["finsight", "tx", "list"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    transactions::query_rows(conn, owner, list_m).unwrap()
}
