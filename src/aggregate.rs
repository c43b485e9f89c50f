// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Summaries over a transaction set for dashboards, charts and reports.
//!
//! Every function here is pure: it reads the slice it is given, never keeps
//! it, and produces the same output for any ordering of the input.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{AggregateError, AggregateResult};
use crate::models::{
    CategoryTotal, Dashboard, MonthKey, MonthSummary, MonthlyTrend, Transaction,
    TransactionFilter, TxType, TypeTotals,
};

/// Longest trend window `group_by_month` accepts (one hundred years).
pub const MAX_MONTHS_BACK: u32 = 1200;

fn checked_amount(t: &Transaction) -> AggregateResult<Decimal> {
    t.amount.require(t.id)
}

/// Sums amounts into income and expense. Empty input yields zeros.
pub fn totals_by_type(transactions: &[Transaction]) -> AggregateResult<TypeTotals> {
    let mut totals = TypeTotals::default();
    for t in transactions {
        let amt = checked_amount(t)?;
        match t.tx_type {
            TxType::Income => totals.income += amt,
            TxType::Expense => totals.expense += amt,
        }
    }
    Ok(totals)
}

/// Sums amounts per category of one type. `None` means expenses, the
/// spending breakdown shown on dashboards; pass `Some(TxType::Income)` for
/// income sources.
///
/// Rows come back largest total first; equal totals are ordered by category
/// name so the result does not depend on input order.
pub fn group_by_category(
    transactions: &[Transaction],
    filter_type: Option<TxType>,
) -> AggregateResult<Vec<CategoryTotal>> {
    let wanted = filter_type.unwrap_or(TxType::Expense);
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for t in transactions.iter().filter(|t| t.tx_type == wanted) {
        let amt = checked_amount(t)?;
        *agg.entry(t.category.as_str()).or_insert(Decimal::ZERO) += amt;
    }
    let mut rows: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.cmp(&b.category))
    });
    Ok(rows)
}

/// Income, expense and balance for each of the `months_back` calendar months
/// ending with the month of `reference`, oldest first.
///
/// Months without data are present with zeros, so the result always has
/// exactly `months_back` rows. Records whose date could not be parsed are
/// left out and counted in [`MonthlyTrend::skipped`]. Windows longer than
/// [`MAX_MONTHS_BACK`] or reaching before chrono's earliest date fail with
/// `WindowOutOfRange`.
pub fn group_by_month(
    transactions: &[Transaction],
    months_back: u32,
    reference: NaiveDate,
) -> AggregateResult<MonthlyTrend> {
    let out_of_range = AggregateError::WindowOutOfRange {
        months_back,
        max: MAX_MONTHS_BACK,
    };
    if months_back > MAX_MONTHS_BACK {
        return Err(out_of_range);
    }
    let newest = MonthKey::of(reference);
    let mut buckets: BTreeMap<MonthKey, (Decimal, Decimal)> = BTreeMap::new();
    for i in 0..months_back {
        let key = newest.back(i).ok_or_else(|| out_of_range.clone())?;
        buckets.insert(key, (Decimal::ZERO, Decimal::ZERO));
    }

    let mut skipped = 0;
    for t in transactions {
        let amt = checked_amount(t)?;
        let Some(date) = t.date.valid() else {
            skipped += 1;
            continue;
        };
        if let Some((income, expense)) = buckets.get_mut(&MonthKey::of(date)) {
            match t.tx_type {
                TxType::Income => *income += amt,
                TxType::Expense => *expense += amt,
            }
        }
    }

    let rows = buckets
        .into_iter()
        .map(|(month, (income, expense))| MonthSummary {
            month,
            label: month.label(),
            income,
            expense,
            balance: income - expense,
        })
        .collect();
    Ok(MonthlyTrend { rows, skipped })
}

// Newest date first, then highest id. Unparseable dates sort last.
fn newest_first(a: &Transaction, b: &Transaction) -> Ordering {
    b.date
        .valid()
        .cmp(&a.date.valid())
        .then_with(|| b.id.cmp(&a.id))
}

pub fn recent_transactions(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| newest_first(a, b));
    sorted.into_iter().take(n).cloned().collect()
}

/// The `n` categories with the largest expense totals.
pub fn top_categories(transactions: &[Transaction], n: usize) -> AggregateResult<Vec<CategoryTotal>> {
    let mut rows = group_by_category(transactions, Some(TxType::Expense))?;
    rows.truncate(n);
    Ok(rows)
}

fn matches(t: &Transaction, filter: &TransactionFilter, needle: Option<&str>) -> bool {
    if let Some(needle) = needle {
        let hit = t.description.to_lowercase().contains(needle)
            || t.category.to_lowercase().contains(needle);
        if !hit {
            return false;
        }
    }
    if filter.tx_type.is_some_and(|ty| ty != t.tx_type) {
        return false;
    }
    if filter.category.as_deref().is_some_and(|c| c != t.category) {
        return false;
    }
    if let Some(range) = filter.date_range {
        return t.date.valid().is_some_and(|d| range.contains(d));
    }
    true
}

/// Keeps the transactions passing every filter that is set.
///
/// The search text matches description or category, ignoring case. A date
/// range excludes records whose date could not be parsed.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    let needle = filter
        .search
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());
    transactions
        .iter()
        .filter(|t| matches(t, filter, needle.as_deref()))
        .cloned()
        .collect()
}

pub fn dashboard(
    transactions: &[Transaction],
    recent_n: usize,
    top_n: usize,
) -> AggregateResult<Dashboard> {
    let totals = totals_by_type(transactions)?;
    Ok(Dashboard {
        totals,
        balance: totals.balance(),
        count: transactions.len(),
        recent: recent_transactions(transactions, recent_n),
        top_categories: top_categories(transactions, top_n)?,
    })
}
