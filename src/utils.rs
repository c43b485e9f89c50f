// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::{DateRange, TxAmount, TxType};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_TREND_MONTHS: u32 = 6;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Amount as entered by a user: a decimal that is not negative.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = s
        .trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", s))?;
    if d < Decimal::ZERO {
        bail!("Invalid amount '{}': must not be negative, use --type instead", s);
    }
    Ok(d)
}

pub fn parse_type(s: &str) -> Result<TxType> {
    s.parse::<TxType>().map_err(anyhow::Error::msg)
}

/// Both ends are required together; a reversed range is an error.
pub fn parse_date_range(from: Option<&String>, to: Option<&String>) -> Result<Option<DateRange>> {
    match (from, to) {
        (None, None) => Ok(None),
        (Some(f), Some(t)) => {
            let start = parse_date(f)?;
            let end = parse_date(t)?;
            if end < start {
                bail!("Date range ends ({}) before it starts ({})", end, start);
            }
            Ok(Some(DateRange { start, end }))
        }
        _ => bail!("--from and --to must be given together"),
    }
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, d)
}

/// Stored amount for display; unreadable text is shown as stored.
pub fn fmt_amount(a: &TxAmount, symbol: &str) -> String {
    match a {
        TxAmount::Valid(d) => fmt_money(d, symbol),
        TxAmount::Invalid(raw) => raw.clone(),
    }
}

/// Dashboard style: `+ $12.00` for income, `- $12.00` for expense.
pub fn fmt_signed(a: &TxAmount, ty: TxType, symbol: &str) -> String {
    let sign = match ty {
        TxType::Income => '+',
        TxType::Expense => '-',
    };
    format!("{} {}", sign, fmt_amount(a, symbol))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_currency_symbol(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, "currency_symbol")?
        .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()))
}

pub fn get_trend_months(conn: &Connection) -> Result<u32> {
    match get_setting(conn, "trend_months")? {
        Some(v) => v
            .parse::<u32>()
            .with_context(|| format!("Invalid trend_months setting '{}'", v)),
        None => Ok(DEFAULT_TREND_MONTHS),
    }
}

/// JSON rendering of `v` when either flag is set. `jsonl` streams array
/// elements one per line.
pub fn json_output<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<Option<String>> {
    if json_flag {
        return Ok(Some(serde_json::to_string_pretty(v)?));
    }
    if jsonl_flag {
        let val = serde_json::to_value(v)?;
        let lines = match val.as_array() {
            Some(arr) => arr
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<Vec<_>, _>>()?,
            None => vec![serde_json::to_string(&val)?],
        };
        return Ok(Some(lines.join("\n")));
    }
    Ok(None)
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    match json_output(json_flag, jsonl_flag, v)? {
        Some(out) => {
            println!("{}", out);
            Ok(true)
        }
        None => Ok(false),
    }
}
