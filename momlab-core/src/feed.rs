//! Time series feed — ordered bars behind a monotone reveal cursor.
//!
//! A feed wraps one asset's (or the benchmark's) daily bars and exposes only
//! the prefix revealed so far. The cursor advances one bar at a time and
//! never rewinds, so downstream consumers cannot look ahead of the
//! simulation clock.

use crate::domain::Bar;
use crate::error::SetupError;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct AssetFeed {
    symbol: String,
    bars: Vec<Bar>,
    revealed: usize,
}

impl AssetFeed {
    /// Build a feed, validating the series up front: dates must be strictly
    /// increasing and closes must not be NaN. Either violation is fatal
    /// because it would silently corrupt momentum state mid-run.
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, SetupError> {
        let symbol = symbol.into();
        for (i, bar) in bars.iter().enumerate() {
            if bar.close.is_nan() {
                return Err(SetupError::NanClose {
                    symbol: symbol.clone(),
                    date: bar.date,
                });
            }
            if i > 0 && bar.date <= bars[i - 1].date {
                return Err(SetupError::NonMonotonicDates {
                    symbol: symbol.clone(),
                    date: bar.date,
                });
            }
        }
        Ok(Self {
            symbol,
            bars,
            revealed: 0,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Reveal the next bar if one remains. Returns whether a bar was revealed.
    pub fn advance(&mut self) -> bool {
        if self.revealed < self.bars.len() {
            self.revealed += 1;
            true
        } else {
            false
        }
    }

    /// The most recently revealed bar, if any.
    pub fn current(&self) -> Option<&Bar> {
        self.revealed.checked_sub(1).map(|i| &self.bars[i])
    }

    /// The last `n` revealed bars, most recent last (fewer if not yet available).
    pub fn history(&self, n: usize) -> &[Bar] {
        &self.bars[self.revealed.saturating_sub(n)..self.revealed]
    }

    /// All bars revealed so far, oldest first.
    pub fn revealed_bars(&self) -> &[Bar] {
        &self.bars[..self.revealed]
    }

    pub fn len_revealed(&self) -> usize {
        self.revealed
    }

    pub fn len_total(&self) -> usize {
        self.bars.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.revealed == self.bars.len()
    }

    /// Date of the next unrevealed bar, if any.
    pub fn next_date(&self) -> Option<NaiveDate> {
        self.bars.get(self.revealed).map(|b| b.date)
    }
}
