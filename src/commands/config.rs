// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::MAX_MONTHS_BACK;
use crate::utils::{
    get_currency_symbol, get_trend_months, set_setting, DEFAULT_CURRENCY_SYMBOL,
};
use anyhow::{bail, Context, Result};
use rusqlite::Connection;

pub const KEYS: [&str; 2] = ["currency_symbol", "trend_months"];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("get", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = match key.as_str() {
                "currency_symbol" => get_currency_symbol(conn)?,
                "trend_months" => get_trend_months(conn)?.to_string(),
                other => bail!("Unknown setting '{}' (known: {})", other, KEYS.join(", ")),
            };
            println!("{}", value);
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap().trim();
            set(conn, key, value)?;
            println!("Set {} = {}", key, value);
        }
        _ => {}
    }
    Ok(())
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    match key {
        "currency_symbol" => {
            let v = if value.is_empty() {
                DEFAULT_CURRENCY_SYMBOL
            } else {
                value
            };
            set_setting(conn, key, v)
        }
        "trend_months" => {
            let n: u32 = value
                .parse()
                .with_context(|| format!("trend_months must be a whole number, got '{}'", value))?;
            if n == 0 || n > MAX_MONTHS_BACK {
                bail!("trend_months must be between 1 and {}", MAX_MONTHS_BACK);
            }
            set_setting(conn, key, &n.to_string())
        }
        other => bail!("Unknown setting '{}' (known: {})", other, KEYS.join(", ")),
    }
}
