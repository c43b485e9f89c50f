// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{TxAmount, TxDate, TxType};
use crate::store::SqliteStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub id: i64,
    pub kind: &'static str,
    pub detail: String,
}

/// Stored rows that aggregation would reject or skip.
pub fn find_issues(conn: &Connection, owner: &str) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();
    for row in SqliteStore::new(conn).list_raw(owner)? {
        match TxAmount::parse(&row.amount) {
            TxAmount::Invalid(raw) => issues.push(Issue {
                id: row.id,
                kind: "invalid_amount",
                detail: raw,
            }),
            TxAmount::Valid(d) if d < Decimal::ZERO => issues.push(Issue {
                id: row.id,
                kind: "negative_amount",
                detail: row.amount.clone(),
            }),
            TxAmount::Valid(_) => {}
        }
        if let TxDate::Invalid(raw) = TxDate::parse(&row.date) {
            issues.push(Issue {
                id: row.id,
                kind: "invalid_date",
                detail: raw,
            });
        }
        if row.tx_type.parse::<TxType>().is_err() {
            issues.push(Issue {
                id: row.id,
                kind: "invalid_type",
                detail: row.tx_type.clone(),
            });
        }
    }
    Ok(issues)
}

pub fn handle(conn: &Connection, owner: &str) -> Result<()> {
    let issues = find_issues(conn, owner)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
        return Ok(());
    }
    warn!(owner, count = issues.len(), "malformed transactions found");
    let rows = issues
        .into_iter()
        .map(|i| vec![i.id.to_string(), i.kind.to_string(), i.detail])
        .collect();
    println!("{}", pretty_table(&["ID", "Issue", "Detail"], rows));
    Ok(())
}
