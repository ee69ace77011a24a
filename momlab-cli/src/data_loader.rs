//! CSV bar loading for the runner.
//!
//! One CSV per symbol with a `date,open,high,low,close,volume` header. Rows
//! with missing or NaN price fields are dropped at ingestion so the engine
//! only ever sees clean series. Symbols whose cleaned series is too short
//! for the momentum lookback are the caller's to skip.

use chrono::NaiveDate;
use momlab_core::domain::Bar;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("series '{symbol}' at {path} has no usable rows")]
    Empty { symbol: String, path: PathBuf },
}

/// One CSV row. Price fields deserialize through `Option` so blank cells
/// survive parsing and can be dropped alongside NaN cells.
#[derive(Debug, Deserialize)]
struct RawRow {
    date: NaiveDate,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    #[serde(default)]
    volume: Option<u64>,
}

impl RawRow {
    fn into_bar(self, symbol: &str) -> Option<Bar> {
        let open = self.open.filter(|v| !v.is_nan())?;
        let high = self.high.filter(|v| !v.is_nan())?;
        let low = self.low.filter(|v| !v.is_nan())?;
        let close = self.close.filter(|v| !v.is_nan())?;
        Some(Bar {
            symbol: symbol.to_string(),
            date: self.date,
            open,
            high,
            low,
            close,
            volume: self.volume.unwrap_or(0),
        })
    }
}

/// Load one symbol's bars from a CSV file, dropping unusable rows.
pub fn load_series(path: &Path, symbol: &str) -> Result<Vec<Bar>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut bars = Vec::new();
    for row in reader.deserialize::<RawRow>() {
        let row = row.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(bar) = row.into_bar(symbol) {
            bars.push(bar);
        }
    }

    if bars.is_empty() {
        return Err(LoadError::Empty {
            symbol: symbol.to_string(),
            path: path.to_path_buf(),
        });
    }
    Ok(bars)
}

/// Read the universe from a CSV whose first column lists one symbol per row
/// (header row skipped).
pub fn load_tickers(path: &Path) -> Result<Vec<String>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tickers = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(field) = record.get(0) {
            let field = field.trim();
            if !field.is_empty() {
                tickers.push(field.to_string());
            }
        }
    }
    Ok(tickers)
}
