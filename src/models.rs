// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::AggregateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            other => Err(format!("Unknown transaction type '{}' (use income|expense)", other)),
        }
    }
}

/// Calendar date of a transaction as loaded from storage.
///
/// Unparseable text is kept verbatim so it can be reported instead of
/// leaking into month buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxDate {
    Valid(NaiveDate),
    Invalid(String),
}

impl TxDate {
    /// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp truncated to its date.
    pub fn parse(raw: &str) -> TxDate {
        let s = raw.trim();
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return TxDate::Valid(d);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return TxDate::Valid(ts.date_naive());
        }
        TxDate::Invalid(raw.to_string())
    }

    pub fn valid(&self) -> Option<NaiveDate> {
        match self {
            TxDate::Valid(d) => Some(*d),
            TxDate::Invalid(_) => None,
        }
    }

    pub fn require(&self, id: i64) -> Result<NaiveDate, AggregateError> {
        match self {
            TxDate::Valid(d) => Ok(*d),
            TxDate::Invalid(raw) => Err(AggregateError::InvalidDate {
                id,
                date: raw.clone(),
            }),
        }
    }
}

impl From<NaiveDate> for TxDate {
    fn from(d: NaiveDate) -> Self {
        TxDate::Valid(d)
    }
}

impl fmt::Display for TxDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxDate::Valid(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            TxDate::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for TxDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Amount of a transaction as loaded from storage. Non-numeric text is kept
/// so the row stays listable and editable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxAmount {
    Valid(Decimal),
    Invalid(String),
}

impl TxAmount {
    pub fn parse(raw: &str) -> TxAmount {
        match raw.trim().parse::<Decimal>() {
            Ok(d) => TxAmount::Valid(d),
            Err(_) => TxAmount::Invalid(raw.to_string()),
        }
    }

    pub fn valid(&self) -> Option<Decimal> {
        match self {
            TxAmount::Valid(d) => Some(*d),
            TxAmount::Invalid(_) => None,
        }
    }

    /// The amount as a usable value: numeric and not negative.
    pub fn require(&self, id: i64) -> Result<Decimal, AggregateError> {
        match self {
            TxAmount::Valid(d) if *d >= Decimal::ZERO => Ok(*d),
            other => Err(AggregateError::InvalidAmount {
                id,
                amount: other.to_string(),
            }),
        }
    }
}

impl From<Decimal> for TxAmount {
    fn from(d: Decimal) -> Self {
        TxAmount::Valid(d)
    }
}

impl fmt::Display for TxAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxAmount::Valid(d) => fmt::Display::fmt(d, f),
            TxAmount::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for TxAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub owner: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    pub amount: TxAmount,
    pub category: String,
    pub description: String,
    pub date: TxDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-supplied fields of a transaction; the store fills in the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub tx_type: TxType,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeTotals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl TypeTotals {
    pub fn balance(&self) -> Decimal {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Year-month bucket key. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl MonthKey {
    pub fn of(date: NaiveDate) -> MonthKey {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// The key `n` months before this one, or `None` past chrono's range.
    pub fn back(&self, n: u32) -> Option<MonthKey> {
        self.first_day()?
            .checked_sub_months(Months::new(n))
            .map(MonthKey::of)
    }

    /// Display label such as `Jan 2024`.
    pub fn label(&self) -> String {
        let idx = (self.month as usize).saturating_sub(1).min(11);
        format!("{} {}", MONTH_ABBR[idx], self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    pub rows: Vec<MonthSummary>,
    /// Records left out because their date could not be parsed.
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub totals: TypeTotals,
    pub balance: Decimal,
    pub count: usize,
    pub recent: Vec<Transaction>,
    pub top_categories: Vec<CategoryTotal>,
}

/// Inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, d: NaiveDate) -> bool {
        self.start <= d && d <= self.end
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub search: Option<String>,
    pub tx_type: Option<TxType>,
    pub category: Option<String>,
    pub date_range: Option<DateRange>,
}
