//! MACDLab CLI — pool analysis and next-day prediction commands.
//!
//! Commands:
//! - `run` — analyze an instrument pool from a TOML config and export artifacts
//! - `predict` — print tomorrow's recommendation for a single instrument

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use macdlab_core::data::{BarSource, DateRange};
use macdlab_core::strategy::Strategy;
use macdlab_runner::{
    analyze_pool, save_artifacts, CsvBarSource, PoolConfig, PoolReport, StrategySpec,
};

#[derive(Parser)]
#[command(
    name = "macdlab",
    about = "MACDLab CLI — MACD signal generation and backtesting engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an instrument pool from a TOML config file.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Directory holding one `<code>.csv` file per instrument.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Output directory for report artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Print the full report as JSON instead of the text summary.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print tomorrow's recommendation for a single instrument.
    Predict {
        /// Instrument code (resolves to `<data_dir>/<code>.csv`).
        #[arg(long)]
        code: String,

        /// Strategy variant: macd_cross, optimized_exit, deepdown_stop.
        #[arg(long, default_value = "macd_cross")]
        strategy: String,

        /// Take-profit fraction for optimized_exit (e.g. 0.10).
        #[arg(long, default_value_t = 0.10)]
        take_profit: f64,

        /// Stop-loss fraction for optimized_exit (e.g. 0.05).
        #[arg(long, default_value_t = 0.05)]
        stop_loss: f64,

        /// Directory holding one `<code>.csv` file per instrument.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Start of the history window (YYYY-MM-DD). Defaults to 2 years ago.
        #[arg(long)]
        start: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            data_dir,
            output_dir,
            json,
        } => run_pool(&config, data_dir, &output_dir, json),
        Commands::Predict {
            code,
            strategy,
            take_profit,
            stop_loss,
            data_dir,
            start,
        } => run_predict(&code, &strategy, take_profit, stop_loss, data_dir, start),
    }
}

fn run_pool(config_path: &PathBuf, data_dir: PathBuf, output_dir: &PathBuf, json: bool) -> Result<()> {
    let config = PoolConfig::from_path(config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let source = CsvBarSource::new(data_dir);

    let report = analyze_pool(&config, &source);

    if json {
        println!("{}", macdlab_runner::export_report_json(&report)?);
    } else {
        print_summary(&report);
    }

    let run_dir = save_artifacts(&report, output_dir)?;
    eprintln!("Artifacts saved to: {}", run_dir.display());

    // Skipped instruments are reported, not fatal: a pool run that produced
    // any ranking is a successful run.
    Ok(())
}

fn print_summary(report: &PoolReport) {
    println!(
        "{:<10} {:<16} {:>12} {:>12} {:>8} {:>6}  {}",
        "code", "name", "return%", "annual%", "p/l", "trades", "next"
    );
    for r in &report.results {
        println!(
            "{:<10} {:<16} {:>12.2} {:>12.2} {:>8.2} {:>6}  {:?}: {}",
            r.code,
            r.name,
            r.total_return,
            r.annual_return * 100.0,
            r.profit_loss_ratio,
            r.stats.total_trades,
            r.prediction.signal,
            r.prediction.reason,
        );
    }
    if !report.failures.is_empty() {
        eprintln!();
        for f in &report.failures {
            eprintln!("skipped {}: {}", f.code, f.error);
        }
    }
}

fn run_predict(
    code: &str,
    strategy_name: &str,
    take_profit: f64,
    stop_loss: f64,
    data_dir: PathBuf,
    start: Option<String>,
) -> Result<()> {
    let strategy = build_strategy(strategy_name, take_profit, stop_loss)?;

    let end = chrono::Local::now().date_naive();
    let start = start
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --start date, expected YYYY-MM-DD")?
        .unwrap_or_else(|| end - chrono::Duration::days(365 * 2));
    let range = DateRange::new(start, end)?;

    let source = CsvBarSource::new(data_dir);
    let series = source.fetch(code, range)?;
    let frame = strategy.generate_signals(&series)?;
    let prediction = strategy.predict_next(&frame);

    println!("instrument:  {code}");
    println!("strategy:    {}", strategy.name());
    println!("as of:       {}", prediction.last_trade_date);
    println!("signal:      {:?}", prediction.signal);
    println!("reason:      {}", prediction.reason);
    println!(
        "dif: {:.4}  dea: {:.4}  macd: {:.4}",
        prediction.dif, prediction.dea, prediction.macd
    );

    Ok(())
}

fn build_strategy(name: &str, take_profit: f64, stop_loss: f64) -> Result<Box<dyn Strategy>> {
    let spec = match name {
        "macd_cross" => StrategySpec::MacdCross,
        "optimized_exit" => StrategySpec::OptimizedExit {
            take_profit_pct: take_profit,
            stop_loss_pct: stop_loss,
        },
        "deepdown_stop" => StrategySpec::DeepdownStop,
        _ => bail!("unknown strategy '{name}'. Valid: macd_cross, optimized_exit, deepdown_stop"),
    };
    Ok(spec.build())
}
