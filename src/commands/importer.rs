// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::NewTransaction;
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{parse_amount, parse_date, parse_type};
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &mut Connection, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(conn, owner, sub),
        _ => Ok(()),
    }
}

/// Reads a report CSV (`Date, Description, Category, Type, Amount`).
/// Either every row is stored or none is.
fn import_transactions(conn: &mut Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    let mut count = 0usize;
    {
        let store = SqliteStore::new(&tx);
        for (i, result) in rdr.records().enumerate() {
            let line = i + 2;
            let rec = result?;
            let date_raw = rec.get(0).context("date missing")?.trim();
            let description = rec.get(1).unwrap_or("").trim().to_string();
            let category = rec.get(2).context("category missing")?.trim().to_string();
            let type_raw = rec.get(3).context("type missing")?.trim();
            let amount_raw = rec.get(4).context("amount missing")?.trim();

            let new = NewTransaction {
                tx_type: parse_type(type_raw).with_context(|| format!("Line {}", line))?,
                amount: parse_amount(amount_raw).with_context(|| format!("Line {}", line))?,
                category,
                description,
                date: parse_date(date_raw).with_context(|| format!("Line {}", line))?,
            };
            store.insert(owner, &new)?;
            count += 1;
        }
    }
    tx.commit()?;
    info!(owner, count, path, "import committed");
    println!("Imported {} transactions from {}", count, path);
    Ok(())
}
