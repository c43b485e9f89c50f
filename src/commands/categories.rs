// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxType;
use crate::utils::{parse_type, pretty_table};
use anyhow::Result;

/// (value, label) pairs offered when recording a transaction. Not enforced.
pub const SUGGESTED: [(&str, &str); 13] = [
    ("Food", "Food & Dining"),
    ("Rent", "Rent & Housing"),
    ("Utilities", "Utilities"),
    ("Transportation", "Transportation"),
    ("Entertainment", "Entertainment"),
    ("Healthcare", "Healthcare"),
    ("Shopping", "Shopping"),
    ("Travel", "Travel"),
    ("Education", "Education"),
    ("Salary", "Salary"),
    ("Investment", "Investment"),
    ("Gift", "Gift"),
    ("Other", "Other"),
];

const INCOME_ONLY: [&str; 2] = ["Salary", "Investment"];
const INCOME: [&str; 4] = ["Salary", "Investment", "Gift", "Other"];

pub fn suggested_for(ty: Option<TxType>) -> Vec<(&'static str, &'static str)> {
    SUGGESTED
        .iter()
        .copied()
        .filter(|(value, _)| match ty {
            None => true,
            Some(TxType::Income) => INCOME.contains(value),
            Some(TxType::Expense) => !INCOME_ONLY.contains(value),
        })
        .collect()
}

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let ty = sub
            .get_one::<String>("type")
            .map(|s| parse_type(s))
            .transpose()?;
        let data = suggested_for(ty)
            .into_iter()
            .map(|(value, label)| vec![value.to_string(), label.to_string()])
            .collect();
        println!("{}", pretty_table(&["Category", "Label"], data));
    }
    Ok(())
}
