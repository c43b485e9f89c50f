// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{filter_transactions, recent_transactions};
use crate::models::{NewTransaction, Transaction, TransactionFilter};
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{
    fmt_amount, get_currency_symbol, maybe_print_json, parse_amount, parse_date,
    parse_date_range, parse_type, pretty_table,
};
use anyhow::{anyhow, bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, owner, sub)?,
        Some(("list", sub)) => list(conn, owner, sub)?,
        Some(("edit", sub)) => edit(conn, owner, sub)?,
        Some(("rm", sub)) => rm(conn, owner, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let new = NewTransaction {
        tx_type: parse_type(sub.get_one::<String>("type").unwrap())?,
        amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
        category: sub.get_one::<String>("category").unwrap().trim().to_string(),
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
    };
    let store = SqliteStore::new(conn);
    let t = store.insert(owner, &new)?;
    println!(
        "Recorded {} {} on {} in '{}' (id {})",
        t.tx_type, t.amount, t.date, t.category, t.id
    );
    Ok(())
}

/// Filtered transactions, newest first, honoring `--limit`.
pub fn query_rows(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = TransactionFilter {
        search: sub.get_one::<String>("search").cloned(),
        tx_type: sub
            .get_one::<String>("type")
            .map(|s| parse_type(s))
            .transpose()?,
        category: sub.get_one::<String>("category").cloned(),
        date_range: parse_date_range(sub.get_one::<String>("from"), sub.get_one::<String>("to"))?,
    };
    let all = SqliteStore::new(conn).list_by_owner(owner)?;
    let matched = filter_transactions(&all, &filter);
    let limit = sub
        .get_one::<usize>("limit")
        .copied()
        .unwrap_or(matched.len());
    Ok(recent_transactions(&matched, limit))
}

fn list(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, owner, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let symbol = get_currency_symbol(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.category.clone(),
                    t.tx_type.to_string(),
                    fmt_amount(&t.amount, &symbol),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Description", "Category", "Type", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let store = SqliteStore::new(conn);
    let current = store
        .get(owner, id)?
        .ok_or_else(|| anyhow!("Transaction {} not found", id))?;

    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => current.date.require(id)?,
    };
    let new = NewTransaction {
        tx_type: match sub.get_one::<String>("type") {
            Some(s) => parse_type(s)?,
            None => current.tx_type,
        },
        amount: match sub.get_one::<String>("amount") {
            Some(s) => parse_amount(s)?,
            None => current.amount.require(id)?,
        },
        category: sub
            .get_one::<String>("category")
            .map(|s| s.trim().to_string())
            .unwrap_or(current.category),
        description: sub
            .get_one::<String>("description")
            .map(|s| s.trim().to_string())
            .unwrap_or(current.description),
        date,
    };
    match store.update(owner, id, &new)? {
        Some(t) => println!("Updated transaction {} ({} {} on {})", t.id, t.tx_type, t.amount, t.date),
        None => bail!("Transaction {} not found", id),
    }
    Ok(())
}

fn rm(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if !SqliteStore::new(conn).delete(owner, id)? {
        bail!("Transaction {} not found", id);
    }
    println!("Removed transaction {}", id);
    Ok(())
}
