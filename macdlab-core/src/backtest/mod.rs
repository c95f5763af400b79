//! Backtest simulator — replays a signal-annotated frame into a trade
//! ledger and summary statistics.

pub mod simulator;
pub mod stats;

pub use simulator::{run_backtest, BacktestError, BacktestReport};
pub use stats::TradingStats;
