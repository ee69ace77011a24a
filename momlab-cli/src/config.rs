//! Serializable backtest configuration.

use momlab_core::config::SimConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the configuration layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Full configuration for a run: where the data lives, what the universe
/// is, and the engine options. Every field defaults, so a TOML file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    /// Directory holding one `<SYMBOL>.csv` per asset and the benchmark.
    pub data_dir: PathBuf,
    /// Benchmark symbol; read from `<data_dir>/<benchmark>.csv`.
    pub benchmark: String,
    /// Explicit universe. Empty means read `tickers_file` instead.
    pub tickers: Vec<String>,
    /// CSV whose first column lists the universe (header row skipped).
    pub tickers_file: Option<PathBuf>,
    /// Output directory for result artifacts.
    pub output_dir: PathBuf,
    /// Engine options.
    pub engine: SimConfig,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            benchmark: "VNINDEX".to_string(),
            tickers: Vec::new(),
            tickers_file: None,
            output_dir: PathBuf::from("results"),
            engine: SimConfig::default(),
        }
    }
}

impl BacktestConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
