// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by aggregation over stored transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// Amount text is not a decimal, or the decimal is negative.
    #[error("Invalid amount '{amount}' on transaction {id}")]
    InvalidAmount { id: i64, amount: String },

    #[error("Invalid date '{date}' on transaction {id}, expected YYYY-MM-DD")]
    InvalidDate { id: i64, date: String },

    #[error("Trend window of {months_back} months is out of range (at most {max}, within supported dates)")]
    WindowOutOfRange { months_back: u32, max: u32 },
}

pub type AggregateResult<T> = std::result::Result<T, AggregateError>;
