//! Trading statistics derived from a completed trade ledger.

use crate::domain::TradeRecord;
use serde::{Deserialize, Serialize};

/// Aggregate statistics for one simulator run.
///
/// Recomputed once per run from the full ledger. Counts cover sell records
/// only: a round trip is one trade. Return extrema and the average are 0.0
/// when no sells occurred. `max_drawdown` is percent, measured against the
/// initial capital baseline (not a trailing peak).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingStats {
    pub total_trades: usize,
    pub profitable_trades: usize,
    pub loss_trades: usize,
    pub max_return: f64,
    pub min_return: f64,
    pub avg_return: f64,
    pub total_profit: f64,
    pub max_drawdown: f64,
}

impl TradingStats {
    /// Compute statistics from a ledger plus run-level aggregates.
    pub fn from_trades(trades: &[TradeRecord], total_profit: f64, max_drawdown: f64) -> Self {
        let sells: Vec<&TradeRecord> = trades.iter().filter(|t| t.is_sell()).collect();

        let total_trades = sells.len();
        let profitable_trades = sells.iter().filter(|t| t.profit > 0.0).count();
        let loss_trades = sells.iter().filter(|t| t.profit < 0.0).count();

        let (max_return, min_return, avg_return) = if sells.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let mut max = f64::NEG_INFINITY;
            let mut min = f64::INFINITY;
            let mut sum = 0.0;
            for t in &sells {
                max = max.max(t.return_rate);
                min = min.min(t.return_rate);
                sum += t.return_rate;
            }
            (max, min, sum / sells.len() as f64)
        };

        Self {
            total_trades,
            profitable_trades,
            loss_trades,
            max_return,
            min_return,
            avg_return,
            total_profit,
            max_drawdown,
        }
    }

    /// Ratio of profitable to losing trades.
    ///
    /// Infinite when there are profitable trades but no losses; NaN for the
    /// 0/0 case (no sells either way). Never clamped, never a crash.
    pub fn profit_loss_ratio(&self) -> f64 {
        if self.loss_trades == 0 {
            if self.profitable_trades == 0 {
                f64::NAN
            } else {
                f64::INFINITY
            }
        } else {
            self.profitable_trades as f64 / self.loss_trades as f64
        }
    }
}
