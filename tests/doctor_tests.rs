// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finsight::commands::doctor::find_issues;
use finsight::db::init_schema;
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    let rows = [
        ("alice", "expense", "10", "2025-01-01"),
        ("alice", "expense", "abc", "2025-01-02"),
        ("alice", "income", "-4", "2025-01-03"),
        ("alice", "expense", "3", "yesterday"),
        ("bob", "expense", "oops", "never"),
    ];
    for (owner, ty, amount, date) in rows {
        conn.execute(
            "INSERT INTO transactions(owner,type,amount,category,description,date,created_at)
             VALUES (?1,?2,?3,'Food','',?4,'2025-01-01T00:00:00+00:00')",
            [owner, ty, amount, date],
        )
        .unwrap();
    }
    conn
}

#[test]
fn doctor_reports_each_malformed_field() {
    let conn = setup();
    let issues = find_issues(&conn, "alice").unwrap();
    let got: Vec<(i64, &str, &str)> = issues
        .iter()
        .map(|i| (i.id, i.kind, i.detail.as_str()))
        .collect();
    assert_eq!(
        got,
        [
            (2, "invalid_amount", "abc"),
            (3, "negative_amount", "-4"),
            (4, "invalid_date", "yesterday"),
        ]
    );
}

#[test]
fn doctor_is_quiet_for_clean_owner() {
    let conn = setup();
    assert!(find_issues(&conn, "carol").unwrap().is_empty());
}
