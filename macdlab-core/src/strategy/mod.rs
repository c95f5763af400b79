//! Signal strategy variants behind a common trait.
//!
//! Every strategy follows the same timing contract: a decision computed from
//! bar `i`'s indicators is written to bar `i + 1`'s annotation slot, modeling
//! "decide after today's close, execute at tomorrow's open". No strategy ever
//! annotates the bar whose crossing triggered the decision, which is what
//! keeps the backtest free of look-ahead bias.
//!
//! The evaluation range is `i in [SLOW_WARMUP, n - 2]`: the final bar's slot
//! receives the decision from `n - 2` and is never executed by the simulator;
//! it is the next-day recommendation that `predict_next` reports.

pub mod deepdown;
pub mod frame;
pub mod macd_cross;
pub mod optimized_exit;

pub use deepdown::DeepdownStop;
pub use frame::SignalFrame;
pub use macd_cross::MacdCross;
pub use optimized_exit::OptimizedExit;

use crate::domain::{BarSeries, Signal};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Slow-EMA warm-up: bars before this index carry unstable MACD values.
pub const SLOW_WARMUP: usize = 26;

/// Contractual minimum history: warm-up plus one evaluation bar plus its
/// next-day slot.
pub const MIN_BARS: usize = SLOW_WARMUP + 2;

/// RSI period. RSI is computed on every frame for interface parity but is a
/// reserved output: no shipped rule consumes it.
pub const RSI_PERIOD: usize = 14;

/// Reason recorded on every evaluated bar that produced no buy/sell.
pub const REASON_OBSERVE: &str = "observe";

/// Hold rationales re-derived by `predict_next` when no fresh signal exists.
pub const REASON_BULLISH_HOLD: &str = "MACD in bullish region, DIF above DEA: hold for a rise";
pub const REASON_BEARISH_WAIT: &str = "MACD in bearish region, DIF below DEA: stay out and wait";

/// Errors from signal generation.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("insufficient history for strategy '{name}': requires at least {required} bars, got {actual}")]
    InsufficientHistory {
        name: String,
        required: usize,
        actual: usize,
    },
}

/// Next-bar recommendation derived from an annotated frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub signal: Signal,
    pub reason: String,
    pub dif: f64,
    pub dea: f64,
    pub macd: f64,
    pub last_trade_date: NaiveDate,
}

/// Common capability set of all strategy variants.
pub trait Strategy {
    fn name(&self) -> &str;

    /// Annotate a validated bar series with per-bar signals and reasons.
    ///
    /// Precondition: at least [`MIN_BARS`] bars; violations return
    /// [`StrategyError::InsufficientHistory`].
    fn generate_signals(&self, series: &BarSeries) -> Result<SignalFrame, StrategyError>;

    /// Read the next-day recommendation out of an annotated frame.
    ///
    /// Shared reading logic: the last bar's annotation is the most recently
    /// assigned (not-yet-executable) signal; dif/dea and the trade date come
    /// from the second-to-last bar, the one whose close produced it. When the
    /// annotation is a hold, the rationale is re-derived from the MACD region.
    fn predict_next(&self, frame: &SignalFrame) -> Prediction {
        let n = frame.len();
        let prev = n.saturating_sub(2);
        let last = frame
            .annotations()
            .last()
            .cloned()
            .unwrap_or_default();

        let dif = frame.dif[prev];
        let dea = frame.dea[prev];
        let reason = if last.signal == Signal::Hold {
            if dif > dea {
                REASON_BULLISH_HOLD.to_string()
            } else {
                REASON_BEARISH_WAIT.to_string()
            }
        } else {
            last.reason
        };

        Prediction {
            signal: last.signal,
            reason,
            dif,
            dea,
            macd: 2.0 * (dif - dea),
            last_trade_date: frame.bars()[prev].trade_date,
        }
    }
}

/// DIF crossed from below to above DEA between bars `i - 1` and `i`.
pub(crate) fn golden_cross(dif: &[f64], dea: &[f64], i: usize) -> bool {
    dif[i - 1] < dea[i - 1] && dif[i] > dea[i]
}

/// DIF crossed from above to below DEA between bars `i - 1` and `i`.
pub(crate) fn death_cross(dif: &[f64], dea: &[f64], i: usize) -> bool {
    dif[i - 1] > dea[i - 1] && dif[i] < dea[i]
}

/// Shared precondition check for `generate_signals`.
pub(crate) fn ensure_history(name: &str, actual: usize) -> Result<(), StrategyError> {
    if actual < MIN_BARS {
        return Err(StrategyError::InsufficientHistory {
            name: name.to_string(),
            required: MIN_BARS,
            actual,
        });
    }
    Ok(())
}
