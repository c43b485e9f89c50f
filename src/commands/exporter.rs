// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use crate::aggregate::filter_transactions;
use crate::error::AggregateError;
use crate::models::{Transaction, TransactionFilter};
use crate::store::{SqliteStore, TransactionStore};
use crate::utils::{parse_date_range, parse_type};
use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

pub const REPORT_HEADERS: [&str; 5] = ["Date", "Description", "Category", "Type", "Amount"];

/// One line of an exported report, in column order.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReportRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Type")]
    pub tx_type: String,
    #[serde(rename = "Amount")]
    pub amount: String,
}

impl TryFrom<&Transaction> for ReportRow {
    type Error = AggregateError;

    fn try_from(t: &Transaction) -> Result<Self, Self::Error> {
        Ok(ReportRow {
            date: t.date.to_string(),
            description: t.description.clone(),
            category: t.category.clone(),
            tx_type: t.tx_type.to_string(),
            amount: format!("{:.2}", t.amount.require(t.id)?),
        })
    }
}

/// Fails on the first transaction whose amount cannot be reported.
pub fn report_rows(txs: &[Transaction]) -> Result<Vec<ReportRow>, AggregateError> {
    txs.iter().map(ReportRow::try_from).collect()
}

/// Writes `rows` as CSV with the report header, even when empty.
pub fn write_csv<W: Write>(out: W, rows: &[ReportRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    wtr.write_record(REPORT_HEADERS)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn default_file_name(today: chrono::NaiveDate, format: &str) -> String {
    format!("financial-report-{}.{}", today.format("%Y-%m-%d"), format)
}

pub fn handle(conn: &Connection, owner: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => export_report(conn, owner, sub),
        _ => Ok(()),
    }
}

fn export_report(conn: &Connection, owner: &str, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let filter = TransactionFilter {
        tx_type: sub
            .get_one::<String>("type")
            .map(|s| parse_type(s))
            .transpose()?,
        date_range: parse_date_range(sub.get_one::<String>("from"), sub.get_one::<String>("to"))?,
        ..TransactionFilter::default()
    };

    let all = SqliteStore::new(conn).list_by_owner(owner)?;
    let selected = filter_transactions(&all, &filter);
    if selected.is_empty() {
        bail!("No transactions found for the selected criteria");
    }
    let rows = report_rows(&selected)?;

    let out = match sub.get_one::<String>("out") {
        Some(p) => p.clone(),
        None => default_file_name(chrono::Local::now().date_naive(), &fmt),
    };
    match fmt.as_str() {
        "csv" => {
            let file =
                std::fs::File::create(&out).with_context(|| format!("Create {}", out))?;
            write_csv(file, &rows)?;
        }
        _ => {
            std::fs::write(&out, serde_json::to_string_pretty(&rows)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    info!(owner, count = rows.len(), path = %out, "exported report");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
