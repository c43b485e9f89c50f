// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::models::Transaction;
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{
    fmt_money, fmt_signed, get_currency_symbol, get_trend_months, json_output, parse_date,
    parse_type, pretty_table,
};
use anyhow::Result;
use rusqlite::Connection;
use tracing::warn;

pub fn handle(conn: &Connection, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    if let Some(out) = render(conn, owner, m)? {
        println!("{}", out);
    }
    Ok(())
}

/// Text of the selected report: a table, or JSON with `--json`/`--jsonl`.
pub fn render(conn: &Connection, owner: &str, m: &clap::ArgMatches) -> Result<Option<String>> {
    let txs = SqliteStore::new(conn).list_by_owner(owner)?;
    let out = match m.subcommand() {
        Some(("totals", sub)) => totals(conn, &txs, sub)?,
        Some(("categories", sub)) => categories(conn, &txs, sub)?,
        Some(("trend", sub)) => trend(conn, &txs, sub)?,
        Some(("recent", sub)) => recent(conn, &txs, sub)?,
        Some(("top", sub)) => top(conn, &txs, sub)?,
        Some(("dashboard", sub)) => dashboard(conn, &txs, sub)?,
        _ => return Ok(None),
    };
    Ok(Some(out))
}

fn json(sub: &clap::ArgMatches, v: &impl serde::Serialize) -> Result<Option<String>> {
    json_output(sub.get_flag("json"), sub.get_flag("jsonl"), v)
}

fn totals(conn: &Connection, txs: &[Transaction], sub: &clap::ArgMatches) -> Result<String> {
    let totals = aggregate::totals_by_type(txs)?;
    if let Some(out) = json(sub, &totals)? {
        return Ok(out);
    }
    let symbol = get_currency_symbol(conn)?;
    let data = vec![
        vec!["Income".to_string(), fmt_money(&totals.income, &symbol)],
        vec!["Expense".to_string(), fmt_money(&totals.expense, &symbol)],
        vec!["Balance".to_string(), fmt_money(&totals.balance(), &symbol)],
    ];
    Ok(pretty_table(&["", "Total"], data).to_string())
}

fn categories(conn: &Connection, txs: &[Transaction], sub: &clap::ArgMatches) -> Result<String> {
    let filter_type = sub
        .get_one::<String>("type")
        .map(|s| parse_type(s))
        .transpose()?;
    let rows = aggregate::group_by_category(txs, filter_type)?;
    if let Some(out) = json(sub, &rows)? {
        return Ok(out);
    }
    let symbol = get_currency_symbol(conn)?;
    let data = rows
        .iter()
        .map(|r| vec![r.category.clone(), fmt_money(&r.total, &symbol)])
        .collect();
    Ok(pretty_table(&["Category", "Total"], data).to_string())
}

fn trend(conn: &Connection, txs: &[Transaction], sub: &clap::ArgMatches) -> Result<String> {
    let months = match sub.get_one::<u32>("months") {
        Some(m) => *m,
        None => get_trend_months(conn)?,
    };
    let reference = match sub.get_one::<String>("as-of") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let trend = aggregate::group_by_month(txs, months, reference)?;
    if trend.skipped > 0 {
        warn!(skipped = trend.skipped, "transactions with unreadable dates left out of trend");
    }
    if let Some(out) = json(sub, &trend)? {
        return Ok(out);
    }
    let symbol = get_currency_symbol(conn)?;
    let data = trend
        .rows
        .iter()
        .map(|r| {
            vec![
                r.month.to_string(),
                r.label.clone(),
                fmt_money(&r.income, &symbol),
                fmt_money(&r.expense, &symbol),
                fmt_money(&r.balance, &symbol),
            ]
        })
        .collect();
    let mut out = pretty_table(&["Month", "Label", "Income", "Expense", "Balance"], data).to_string();
    if trend.skipped > 0 {
        out.push_str(&format!(
            "\n{} transaction(s) skipped: date could not be read (see `finsight doctor`)",
            trend.skipped
        ));
    }
    Ok(out)
}

fn recent_rows(txs: &[Transaction], symbol: &str) -> Vec<Vec<String>> {
    txs.iter()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.description.clone(),
                t.category.clone(),
                fmt_signed(&t.amount, t.tx_type, symbol),
            ]
        })
        .collect()
}

fn recent(conn: &Connection, txs: &[Transaction], sub: &clap::ArgMatches) -> Result<String> {
    let n = *sub.get_one::<usize>("limit").unwrap();
    let rows = aggregate::recent_transactions(txs, n);
    if let Some(out) = json(sub, &rows)? {
        return Ok(out);
    }
    let symbol = get_currency_symbol(conn)?;
    Ok(pretty_table(
        &["Date", "Description", "Category", "Amount"],
        recent_rows(&rows, &symbol),
    )
    .to_string())
}

fn top(conn: &Connection, txs: &[Transaction], sub: &clap::ArgMatches) -> Result<String> {
    let n = *sub.get_one::<usize>("limit").unwrap();
    let rows = aggregate::top_categories(txs, n)?;
    if let Some(out) = json(sub, &rows)? {
        return Ok(out);
    }
    let symbol = get_currency_symbol(conn)?;
    let data = rows
        .iter()
        .map(|r| vec![r.category.clone(), fmt_money(&r.total, &symbol)])
        .collect();
    Ok(pretty_table(&["Category", "Spent"], data).to_string())
}

fn dashboard(conn: &Connection, txs: &[Transaction], sub: &clap::ArgMatches) -> Result<String> {
    let dash = aggregate::dashboard(txs, 5, 5)?;
    if let Some(out) = json(sub, &dash)? {
        return Ok(out);
    }
    let symbol = get_currency_symbol(conn)?;
    let summary = pretty_table(
        &["Income", "Expense", "Balance", "Transactions"],
        vec![vec![
            fmt_money(&dash.totals.income, &symbol),
            fmt_money(&dash.totals.expense, &symbol),
            fmt_money(&dash.balance, &symbol),
            dash.count.to_string(),
        ]],
    );
    let recent = pretty_table(
        &["Date", "Description", "Category", "Amount"],
        recent_rows(&dash.recent, &symbol),
    );
    let data = dash
        .top_categories
        .iter()
        .map(|r| vec![r.category.clone(), fmt_money(&r.total, &symbol)])
        .collect();
    let top = pretty_table(&["Category", "Spent"], data);
    Ok(format!(
        "{}\nRecent transactions\n{}\nTop spending categories\n{}",
        summary, recent, top
    ))
}
