//! Report export — JSON and CSV artifact generation.
//!
//! Two export formats for a pool run:
//! - **JSON**: the full `PoolReport`, round-trippable
//! - **CSV**: per-instrument trade ledger for external analysis tools

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use macdlab_core::domain::TradeRecord;

use crate::pool::PoolReport;

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `PoolReport` to pretty JSON.
pub fn export_report_json(report: &PoolReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize PoolReport to JSON")
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export a trade ledger as CSV.
///
/// Columns: date, action, price, shares, profit, return_rate, reason
pub fn export_trades_csv(trades: &[TradeRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "date",
        "action",
        "price",
        "shares",
        "profit",
        "return_rate",
        "reason",
    ])?;

    for t in trades {
        wtr.write_record([
            &t.date.to_string(),
            &format!("{:?}", t.action).to_lowercase(),
            &format!("{:.4}", t.price),
            &format!("{:.4}", t.shares),
            &format!("{:.2}", t.profit),
            &format!("{:.4}", t.return_rate),
            &t.reason,
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a pool run.
///
/// Creates a directory named `pool_{timestamp}/` under `output_dir`
/// containing:
/// - `report.json` — the full `PoolReport`
/// - `trades_{code}.csv` — one trade ledger per surviving instrument
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &PoolReport, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!("pool_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_report_json(report)?;
    std::fs::write(run_dir.join("report.json"), &json)?;

    for result in &report.results {
        let csv = export_trades_csv(&result.trades)?;
        std::fs::write(run_dir.join(format!("trades_{}.csv", result.code)), &csv)?;
    }

    Ok(run_dir)
}
