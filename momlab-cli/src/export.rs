//! Result artifact export (CSV + JSON).

use crate::summary::RunSummary;
use anyhow::{Context, Result};
use momlab_core::domain::{RejectedOrder, TradeRecord};
use momlab_core::engine::EquityPoint;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn write_equity_csv(path: &Path, curve: &[EquityPoint]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create equity CSV {}", path.display()))?;
    writeln!(file, "date,equity")?;
    for point in curve {
        writeln!(file, "{},{:.4}", point.date, point.equity)?;
    }
    Ok(())
}

pub fn write_trades_csv(path: &Path, trades: &[TradeRecord]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create trades CSV {}", path.display()))?;
    writeln!(
        file,
        "symbol,entry_date,exit_date,entry_price,exit_price,size,gross_pnl,commission,net_pnl"
    )?;
    for trade in trades {
        writeln!(
            file,
            "{},{},{},{:.4},{:.4},{},{:.4},{:.4},{:.4}",
            trade.symbol,
            trade.entry_date,
            trade.exit_date,
            trade.entry_price,
            trade.exit_price,
            trade.size,
            trade.gross_pnl,
            trade.commission,
            trade.net_pnl
        )?;
    }
    Ok(())
}

pub fn write_rejected_csv(path: &Path, rejected: &[RejectedOrder]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create rejected-order CSV {}", path.display()))?;
    writeln!(file, "symbol,date,size,price,reason")?;
    for order in rejected {
        writeln!(
            file,
            "{},{},{},{:.4},\"{}\"",
            order.symbol, order.date, order.size, order.price, order.reason
        )?;
    }
    Ok(())
}

pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write summary JSON {}", path.display()))?;
    Ok(())
}
