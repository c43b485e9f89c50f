// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Owner-scoped transaction storage.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::{NewTransaction, Transaction, TxAmount, TxDate, TxType};

/// The four operations report and command code needs from persistence.
pub trait TransactionStore {
    /// All transactions of `owner`, in insertion order.
    fn list_by_owner(&self, owner: &str) -> Result<Vec<Transaction>>;

    fn insert(&self, owner: &str, tx: &NewTransaction) -> Result<Transaction>;

    /// Replaces every caller-owned field. `None` when `id` is not one of
    /// `owner`'s transactions.
    fn update(&self, owner: &str, id: i64, tx: &NewTransaction) -> Result<Option<Transaction>>;

    /// Hard delete. Returns whether a row was removed.
    fn delete(&self, owner: &str, id: i64) -> Result<bool>;
}

/// A transactions row exactly as stored, before any validation.
#[derive(Debug, Clone)]
pub struct StoredRow {
    pub id: i64,
    pub owner: String,
    pub tx_type: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub date: String,
    pub created_at: String,
    pub updated_at: Option<String>,
}

const SELECT_COLUMNS: &str =
    "SELECT id, owner, type, amount, category, description, date, created_at, updated_at FROM transactions";

fn stored_row(r: &Row<'_>) -> rusqlite::Result<StoredRow> {
    Ok(StoredRow {
        id: r.get(0)?,
        owner: r.get(1)?,
        tx_type: r.get(2)?,
        amount: r.get(3)?,
        category: r.get(4)?,
        description: r.get(5)?,
        date: r.get(6)?,
        created_at: r.get(7)?,
        updated_at: r.get(8)?,
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let ts = DateTime::parse_from_rfc3339(s).with_context(|| format!("Invalid timestamp '{}'", s))?;
    Ok(ts.with_timezone(&Utc))
}

impl StoredRow {
    pub fn into_transaction(self) -> Result<Transaction> {
        let tx_type: TxType = self
            .tx_type
            .parse()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Transaction {}", self.id))?;
        let created_at = parse_timestamp(&self.created_at)?;
        let updated_at = self.updated_at.as_deref().map(parse_timestamp).transpose()?;
        Ok(Transaction {
            id: self.id,
            owner: self.owner,
            tx_type,
            amount: TxAmount::parse(&self.amount),
            category: self.category,
            description: self.description,
            date: TxDate::parse(&self.date),
            created_at,
            updated_at,
        })
    }
}

fn ensure_non_negative(tx: &NewTransaction) -> Result<()> {
    if tx.amount < Decimal::ZERO {
        bail!("Amount must be non-negative, got {}", tx.amount);
    }
    Ok(())
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        SqliteStore { conn }
    }

    /// Stored text of every row for `owner`, for diagnostics.
    pub fn list_raw(&self, owner: &str) -> Result<Vec<StoredRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE owner=?1 ORDER BY id", SELECT_COLUMNS))?;
        let rows = stmt.query_map(params![owner], stored_row)?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?);
        }
        Ok(data)
    }

    pub fn get(&self, owner: &str, id: i64) -> Result<Option<Transaction>> {
        let row = self
            .conn
            .query_row(
                &format!("{} WHERE owner=?1 AND id=?2", SELECT_COLUMNS),
                params![owner, id],
                stored_row,
            )
            .optional()?;
        row.map(StoredRow::into_transaction).transpose()
    }
}

impl TransactionStore for SqliteStore<'_> {
    fn list_by_owner(&self, owner: &str) -> Result<Vec<Transaction>> {
        let rows = self.list_raw(owner)?;
        debug!(owner, count = rows.len(), "loaded transactions");
        rows.into_iter().map(StoredRow::into_transaction).collect()
    }

    fn insert(&self, owner: &str, tx: &NewTransaction) -> Result<Transaction> {
        ensure_non_negative(tx)?;
        self.conn.execute(
            "INSERT INTO transactions(owner, type, amount, category, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                owner,
                tx.tx_type.as_str(),
                tx.amount.to_string(),
                tx.category,
                tx.description,
                tx.date.to_string(),
                Utc::now().to_rfc3339(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(owner, id, "inserted transaction");
        self.get(owner, id)?
            .with_context(|| format!("Transaction {} vanished after insert", id))
    }

    fn update(&self, owner: &str, id: i64, tx: &NewTransaction) -> Result<Option<Transaction>> {
        ensure_non_negative(tx)?;
        let changed = self.conn.execute(
            "UPDATE transactions
             SET type=?1, amount=?2, category=?3, description=?4, date=?5, updated_at=?6
             WHERE id=?7 AND owner=?8",
            params![
                tx.tx_type.as_str(),
                tx.amount.to_string(),
                tx.category,
                tx.description,
                tx.date.to_string(),
                Utc::now().to_rfc3339(),
                id,
                owner,
            ],
        )?;
        if changed == 0 {
            debug!(owner, id, "update matched no transaction");
            return Ok(None);
        }
        info!(owner, id, "updated transaction");
        self.get(owner, id)
    }

    fn delete(&self, owner: &str, id: i64) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM transactions WHERE id=?1 AND owner=?2",
            params![id, owner],
        )?;
        info!(owner, id, removed, "deleted transaction");
        Ok(removed > 0)
    }
}
