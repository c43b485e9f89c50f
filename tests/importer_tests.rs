// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finsight::commands::exporter::{report_rows, write_csv};
use finsight::models::TxType;
use finsight::store::{SqliteStore, TransactionStore};
use finsight::{cli, commands::importer, db::init_schema};
use rusqlite::Connection;
use std::io::Write;
use tempfile::NamedTempFile;

fn base_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

fn import(conn: &mut Connection, owner: &str, path: &str) -> anyhow::Result<()> {
    let matches =
        cli::build_cli().get_matches_from(["finsight", "import", "transactions", "--path", path]);
    if let Some(("import", import_m)) = matches.subcommand() {
        importer::handle(conn, owner, import_m)
    } else {
        panic!("no import subcommand");
    }
}

fn csv_file(body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn imports_report_layout_and_trims_path() {
    let mut conn = base_conn();
    let file = csv_file(
        "Date,Description,Category,Type,Amount\n\
         2025-02-03,Corner shop,Food,expense,5.00\n\
         2025-02-04, Payday ,Salary,Income,1200\n",
    );
    let padded = format!("  {}  ", file.path().to_str().unwrap());
    import(&mut conn, "alice", &padded).unwrap();

    let txs = SqliteStore::new(&conn).list_by_owner("alice").unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].category, "Food");
    assert_eq!(txs[0].tx_type, TxType::Expense);
    assert_eq!(txs[1].description, "Payday");
    assert_eq!(txs[1].tx_type, TxType::Income);
}

#[test]
fn bad_row_rolls_back_whole_import() {
    let mut conn = base_conn();
    let file = csv_file(
        "Date,Description,Category,Type,Amount\n\
         2025-02-03,Corner shop,Food,expense,5.00\n\
         2025-02-30,Bad day,Food,expense,1.00\n",
    );
    let err = import(&mut conn, "alice", file.path().to_str().unwrap()).unwrap_err();
    assert!(format!("{:#}", err).contains("Line 3"));
    assert!(SqliteStore::new(&conn).list_by_owner("alice").unwrap().is_empty());
}

#[test]
fn negative_amount_row_is_rejected() {
    let mut conn = base_conn();
    let file = csv_file(
        "Date,Description,Category,Type,Amount\n\
         2025-02-03,Refund,Food,expense,-5.00\n",
    );
    assert!(import(&mut conn, "alice", file.path().to_str().unwrap()).is_err());
    assert!(SqliteStore::new(&conn).list_by_owner("alice").unwrap().is_empty());
}

#[test]
fn exported_report_imports_back_unchanged() {
    let mut conn = base_conn();
    let file = csv_file(
        "Date,Description,Category,Type,Amount\n\
         2025-01-31,\"Rent, January\",Rent,expense,850.00\n\
         2025-02-01,Bonus,Gift,income,75.25\n",
    );
    import(&mut conn, "alice", file.path().to_str().unwrap()).unwrap();
    let txs = SqliteStore::new(&conn).list_by_owner("alice").unwrap();

    let mut buf = Vec::new();
    write_csv(&mut buf, &report_rows(&txs).unwrap()).unwrap();
    let original = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), original);
}
