//! MomLab CLI — run a cross-sectional momentum backtest over CSV data.
//!
//! `momlab run` loads a benchmark series and a universe of per-ticker CSVs,
//! simulates the monthly top-K momentum strategy bar by bar, writes result
//! artifacts (equity curve, benchmark curve, trade log, rejected orders,
//! summary JSON) to the output directory, and prints a summary.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod data_loader;
mod export;
mod summary;

use config::BacktestConfig;
use data_loader::{load_series, load_tickers};
use momlab_core::engine::Driver;
use summary::RunSummary;

#[derive(Parser)]
#[command(
    name = "momlab",
    about = "MomLab CLI — cross-sectional momentum backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest from a TOML config file, with flag overrides.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Data directory with one CSV per symbol.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Benchmark symbol, e.g. VNINDEX.
        #[arg(long)]
        benchmark: Option<String>,

        /// CSV whose first column lists the universe.
        #[arg(long)]
        tickers_file: Option<PathBuf>,

        /// Start date (YYYY-MM-DD); earlier bars are ignored.
        #[arg(long)]
        start: Option<String>,

        /// Starting cash.
        #[arg(long)]
        cash: Option<f64>,

        /// Momentum lookback in trading days.
        #[arg(long)]
        lookback: Option<usize>,

        /// Number of assets held per period.
        #[arg(long)]
        top: Option<usize>,

        /// Output directory for result artifacts.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            data_dir,
            benchmark,
            tickers_file,
            start,
            cash,
            lookback,
            top,
            output_dir,
        } => run_backtest_cmd(
            config,
            data_dir,
            benchmark,
            tickers_file,
            start,
            cash,
            lookback,
            top,
            output_dir,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_backtest_cmd(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    benchmark: Option<String>,
    tickers_file: Option<PathBuf>,
    start: Option<String>,
    cash: Option<f64>,
    lookback: Option<usize>,
    top: Option<usize>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => BacktestConfig::from_toml_file(path)?,
        None => BacktestConfig::default(),
    };

    // Flags override the file.
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    if let Some(symbol) = benchmark {
        config.benchmark = symbol;
    }
    if let Some(path) = tickers_file {
        config.tickers_file = Some(path);
    }
    if let Some(text) = start {
        let date = NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .with_context(|| format!("invalid start date '{text}', expected YYYY-MM-DD"))?;
        config.engine.start_date = Some(date);
    }
    if let Some(amount) = cash {
        config.engine.initial_cash = amount;
    }
    if let Some(period) = lookback {
        config.engine.lookback_period = period;
    }
    if let Some(k) = top {
        config.engine.top_quintile = k;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    let tickers = if !config.tickers.is_empty() {
        config.tickers.clone()
    } else if let Some(path) = &config.tickers_file {
        load_tickers(path)?
    } else {
        bail!("no universe: set `tickers` in the config or pass --tickers-file");
    };

    let benchmark_path = config.data_dir.join(format!("{}.csv", config.benchmark));
    let benchmark_bars = load_series(&benchmark_path, &config.benchmark)?;

    // Skip symbols whose cleaned series cannot cover the momentum window —
    // they could never become eligible anyway.
    let mut universe = Vec::new();
    for ticker in &tickers {
        let path = config.data_dir.join(format!("{ticker}.csv"));
        let bars = match load_series(&path, ticker) {
            Ok(bars) => bars,
            Err(err) => {
                eprintln!("WARNING: skipping {ticker}: {err}");
                continue;
            }
        };
        if bars.len() <= config.engine.lookback_period {
            eprintln!(
                "WARNING: skipping {ticker}: {} bars is not enough for the {}-bar lookback",
                bars.len(),
                config.engine.lookback_period
            );
            continue;
        }
        universe.push((ticker.clone(), bars));
    }
    println!("Number of stocks: {}", universe.len());

    let driver = Driver::new(&config.engine, benchmark_bars, universe)?;
    println!(
        "Starting portfolio value: {:.2}",
        config.engine.initial_cash
    );
    let result = driver.run();
    println!("Final portfolio value: {:.2}", result.final_equity);

    let run_summary = RunSummary::from_result(&result);
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    export::write_equity_csv(&config.output_dir.join("equity.csv"), &result.equity_curve)?;
    export::write_equity_csv(
        &config.output_dir.join("benchmark.csv"),
        &result.benchmark_curve,
    )?;
    export::write_trades_csv(&config.output_dir.join("trades.csv"), &result.trades)?;
    export::write_rejected_csv(
        &config.output_dir.join("rejected.csv"),
        &result.rejected_orders,
    )?;
    export::write_summary_json(&config.output_dir.join("summary.json"), &run_summary)?;

    println!(
        "Total return {:.2}% vs benchmark {:.2}% | max drawdown {:.2}%",
        run_summary.total_return * 100.0,
        run_summary.benchmark_return * 100.0,
        run_summary.max_drawdown * 100.0
    );
    println!(
        "Trades: {} ({:.1}% winners), rejected orders: {}, rebalances: {}",
        run_summary.num_trades,
        run_summary.win_rate * 100.0,
        run_summary.rejected_orders,
        run_summary.rebalances
    );
    println!("Artifacts written to {}", config.output_dir.display());
    Ok(())
}
