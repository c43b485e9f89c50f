// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use finsight::db::init_schema;
use finsight::error::AggregateError;
use finsight::aggregate::totals_by_type;
use finsight::models::{NewTransaction, TxAmount, TxDate, TxType};
use finsight::store::{SqliteStore, TransactionStore};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

fn new_tx(ty: TxType, amount: &str, category: &str, date: &str) -> NewTransaction {
    NewTransaction {
        tx_type: ty,
        amount: amount.parse().unwrap(),
        category: category.into(),
        description: format!("{} purchase", category),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

#[test]
fn insert_assigns_id_and_created_at() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let a = store
        .insert("alice", &new_tx(TxType::Expense, "12.50", "Food", "2024-01-10"))
        .unwrap();
    let b = store
        .insert("alice", &new_tx(TxType::Income, "1000", "Salary", "2024-01-05"))
        .unwrap();
    assert!(b.id > a.id);
    assert_eq!(a.owner, "alice");
    assert_eq!(a.amount.valid(), Some("12.5".parse::<Decimal>().unwrap()));
    assert_eq!(a.date, TxDate::Valid(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()));
    assert!(a.updated_at.is_none());

    let listed = store.list_by_owner("alice").unwrap();
    assert_eq!(listed, vec![a, b]);
}

#[test]
fn queries_are_scoped_to_owner() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let mine = store
        .insert("alice", &new_tx(TxType::Expense, "5", "Food", "2024-01-10"))
        .unwrap();
    store
        .insert("bob", &new_tx(TxType::Expense, "7", "Travel", "2024-01-11"))
        .unwrap();

    assert_eq!(store.list_by_owner("alice").unwrap().len(), 1);
    assert_eq!(store.list_by_owner("bob").unwrap().len(), 1);
    assert!(store.list_by_owner("carol").unwrap().is_empty());

    // bob can neither edit nor remove alice's record
    let edit = new_tx(TxType::Income, "1", "Gift", "2024-02-01");
    assert!(store.update("bob", mine.id, &edit).unwrap().is_none());
    assert!(!store.delete("bob", mine.id).unwrap());
    assert_eq!(store.list_by_owner("alice").unwrap()[0], mine);
}

#[test]
fn update_replaces_fields_and_stamps_updated_at() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let t = store
        .insert("alice", &new_tx(TxType::Expense, "5", "Food", "2024-01-10"))
        .unwrap();
    let mut edit = new_tx(TxType::Income, "99.99", "Gift", "2024-02-01");
    edit.description = "birthday".into();
    let updated = store.update("alice", t.id, &edit).unwrap().unwrap();
    assert_eq!(updated.id, t.id);
    assert_eq!(updated.tx_type, TxType::Income);
    assert_eq!(updated.amount, TxAmount::Valid("99.99".parse().unwrap()));
    assert_eq!(updated.category, "Gift");
    assert_eq!(updated.description, "birthday");
    assert_eq!(updated.created_at, t.created_at);
    assert!(updated.updated_at.is_some());

    assert!(store.update("alice", 4242, &edit).unwrap().is_none());
}

#[test]
fn delete_is_hard_and_ids_are_not_reused() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let first = store
        .insert("alice", &new_tx(TxType::Expense, "5", "Food", "2024-01-10"))
        .unwrap();
    assert!(store.delete("alice", first.id).unwrap());
    assert!(!store.delete("alice", first.id).unwrap());
    assert!(store.list_by_owner("alice").unwrap().is_empty());

    let next = store
        .insert("alice", &new_tx(TxType::Expense, "6", "Food", "2024-01-11"))
        .unwrap();
    assert!(next.id > first.id);
}

#[test]
fn negative_amounts_are_rejected_on_write() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let mut bad = new_tx(TxType::Expense, "5", "Food", "2024-01-10");
    bad.amount = "-5".parse().unwrap();
    assert!(store.insert("alice", &bad).is_err());
    assert!(store.list_by_owner("alice").unwrap().is_empty());
}

#[test]
fn malformed_amount_loads_as_invalid_and_fails_totals() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    store
        .insert("alice", &new_tx(TxType::Expense, "4", "Food", "2024-01-09"))
        .unwrap();
    conn.execute(
        "INSERT INTO transactions(owner, type, amount, category, description, date, created_at)
         VALUES ('alice','expense','twelve','Food','','2024-01-10','2024-01-10T00:00:00+00:00')",
        [],
    )
    .unwrap();
    let txs = store.list_by_owner("alice").unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[1].amount, TxAmount::Invalid("twelve".into()));

    let err = totals_by_type(&txs).unwrap_err();
    assert!(matches!(err, AggregateError::InvalidAmount { amount, .. } if amount == "twelve"));
}

#[test]
fn malformed_date_loads_as_invalid() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(owner, type, amount, category, description, date, created_at)
         VALUES ('alice','expense','3','Food','','31/01/2024','2024-01-10T00:00:00+00:00')",
        [],
    )
    .unwrap();
    let txs = SqliteStore::new(&conn).list_by_owner("alice").unwrap();
    assert_eq!(txs[0].date, TxDate::Invalid("31/01/2024".into()));
    assert!(txs[0].date.require(txs[0].id).is_err());
}
