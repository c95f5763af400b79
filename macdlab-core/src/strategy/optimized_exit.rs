//! MACD crossover with optimized exits: take-profit, stop-loss, early exit.
//!
//! While long, the close-to-entry change is checked before anything else;
//! a stop-loss or take-profit hit sells and skips the cross checks for that
//! bar. A gain of 9.8% or more is clamped to exactly 10% before the check,
//! absorbing daily price-limit distortion. Entry price is the open of the
//! bar that executes the buy (bar `i + 1`), matching what the simulator pays.

use crate::domain::{Annotation, BarSeries, Signal};
use crate::indicators::MacdParams;

use super::{
    death_cross, ensure_history, golden_cross, SignalFrame, Strategy, StrategyError,
    REASON_OBSERVE, SLOW_WARMUP,
};

pub const REASON_GOLDEN_CROSS: &str = "MACD golden cross today, buy at tomorrow's open";
pub const REASON_DEATH_CROSS: &str = "MACD death cross today, sell at tomorrow's open";
pub const REASON_EARLY_EXIT: &str =
    "DIF narrowing onto DEA from above, sell at tomorrow's open before the death cross";

/// Gap below which a bullish DIF-DEA pair counts as an imminent death cross.
const EARLY_EXIT_GAP: f64 = 0.02;

/// Gains at or above this are clamped to exactly 10% (daily price limit).
const PRICE_LIMIT_CLAMP_FROM: f64 = 0.098;
const PRICE_LIMIT_CLAMP_TO: f64 = 0.10;

/// MACD crossover with take-profit / stop-loss / early-exit rules.
#[derive(Debug, Clone)]
pub struct OptimizedExit {
    pub take_profit_pct: f64,
    pub stop_loss_pct: f64,
    params: MacdParams,
}

impl OptimizedExit {
    pub fn new(take_profit_pct: f64, stop_loss_pct: f64) -> Self {
        Self {
            take_profit_pct,
            stop_loss_pct,
            params: MacdParams::default(),
        }
    }

    fn decide(&self, frame: &SignalFrame) -> Vec<Annotation> {
        let n = frame.len();
        let bars = frame.bars();
        let mut annotations = vec![Annotation::default(); n];

        let mut in_position = false;
        let mut entry_price: Option<f64> = None;

        for i in SLOW_WARMUP..=n - 2 {
            // Exit checks run first and consume the bar when they fire.
            if in_position {
                if let Some(entry) = entry_price {
                    let mut price_change = (bars[i].close - entry) / entry;
                    if price_change >= PRICE_LIMIT_CLAMP_FROM {
                        price_change = PRICE_LIMIT_CLAMP_TO;
                    }

                    if price_change <= -self.stop_loss_pct {
                        annotations[i + 1] = Annotation::new(
                            Signal::Sell,
                            format!(
                                "stop-loss hit: down {:.1}% from entry, sell at tomorrow's open",
                                self.stop_loss_pct * 100.0
                            ),
                        );
                        in_position = false;
                        entry_price = None;
                        continue;
                    }

                    if price_change >= self.take_profit_pct {
                        annotations[i + 1] = Annotation::new(
                            Signal::Sell,
                            format!(
                                "take-profit hit: up {:.1}% from entry, sell at tomorrow's open",
                                self.take_profit_pct * 100.0
                            ),
                        );
                        in_position = false;
                        entry_price = None;
                        continue;
                    }
                }
            }

            if golden_cross(&frame.dif, &frame.dea, i) {
                annotations[i + 1] = Annotation::new(Signal::Buy, REASON_GOLDEN_CROSS);
                // Entry is the execution price: next bar's open.
                entry_price = Some(bars[i + 1].open);
                in_position = true;
            } else if in_position
                && frame.dif[i] > frame.dea[i]
                && (frame.dif[i] - frame.dea[i]) < EARLY_EXIT_GAP
                && frame.dif[i] < frame.dif[i - 1]
            {
                annotations[i + 1] = Annotation::new(Signal::Sell, REASON_EARLY_EXIT);
                in_position = false;
                entry_price = None;
            } else if in_position && death_cross(&frame.dif, &frame.dea, i) {
                annotations[i + 1] = Annotation::new(Signal::Sell, REASON_DEATH_CROSS);
                in_position = false;
                entry_price = None;
            } else {
                annotations[i + 1] = Annotation::new(Signal::Hold, REASON_OBSERVE);
            }
        }

        annotations
    }
}

impl Strategy for OptimizedExit {
    fn name(&self) -> &str {
        "optimized_exit"
    }

    fn generate_signals(&self, series: &BarSeries) -> Result<SignalFrame, StrategyError> {
        ensure_history(self.name(), series.len())?;
        let mut frame = SignalFrame::from_series(series, self.params);
        let annotations = self.decide(&frame);
        frame.set_annotations(annotations);
        Ok(frame)
    }
}
