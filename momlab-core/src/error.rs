//! Setup-time error taxonomy.
//!
//! Setup errors abort the run before simulation starts and carry enough
//! context (series, date, check) to diagnose without re-running. Per-asset
//! and per-order conditions are not errors: short-history assets drop out of
//! eligibility and cash-starved buys are rejected and logged, while the run
//! continues.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    #[error("benchmark series is missing or empty")]
    EmptyBenchmark,

    #[error("series '{symbol}' has non-monotonic dates at {date}")]
    NonMonotonicDates { symbol: String, date: NaiveDate },

    #[error("series '{symbol}' has a NaN close at {date}")]
    NanClose { symbol: String, date: NaiveDate },

    #[error("no asset series is longer than the {lookback}-bar momentum lookback")]
    InsufficientHistory { lookback: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
