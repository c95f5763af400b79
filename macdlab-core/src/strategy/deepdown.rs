//! MACD crossover gated by a deep prior drawdown, with a 20-day floor stop.
//!
//! Buys only a golden cross that follows a significant bearish gap (the
//! minimum of DIF - DEA over the prior 5 bars below -0.2) and is not a
//! high-open day. The 20-day rolling low at entry time becomes a protective
//! floor for a 20-bar holding window; after the window the floor trails the
//! current 20-day low. A DIF - DEA gap above +0.2 takes profit at any time.

use crate::domain::{Annotation, BarSeries, Signal};
use crate::indicators::{rolling_min, MacdParams};

use super::{
    ensure_history, golden_cross, SignalFrame, Strategy, StrategyError, REASON_OBSERVE,
    SLOW_WARMUP,
};

pub const REASON_DEEP_GAP_BUY: &str =
    "golden cross after a deep DIF-DEA gap, buy at tomorrow's open";
pub const REASON_ENTRY_FLOOR_BREACH: &str =
    "low breached the 20-day floor recorded at entry, sell at tomorrow's open";
pub const REASON_CURRENT_FLOOR_BREACH: &str =
    "low breached the current 20-day low, sell at tomorrow's open";
pub const REASON_MACD_STRENGTH: &str =
    "DIF far above DEA, take profit at tomorrow's open";

/// Opening gain over the prior close above which a buy is skipped.
const HIGH_OPEN_THRESHOLD: f64 = 0.02;
/// Prior 5-bar minimum of DIF - DEA must be below this to qualify a buy.
const DEEP_GAP_THRESHOLD: f64 = -0.2;
/// DIF - DEA above this takes profit regardless of the floor.
const STRENGTH_THRESHOLD: f64 = 0.2;
/// Bars of DIF - DEA history inspected before a cross.
const LOOKBACK: usize = 5;
/// Rolling window for the protective low.
const FLOOR_WINDOW: usize = 20;
/// Bars after entry during which the entry-time floor applies.
const HOLDING_PERIOD: usize = 20;

/// Deep-drawdown gated MACD strategy with a rolling-low stop.
#[derive(Debug, Clone, Default)]
pub struct DeepdownStop {
    params: MacdParams,
}

impl DeepdownStop {
    pub fn new(params: MacdParams) -> Self {
        Self { params }
    }

    fn decide(&self, frame: &SignalFrame) -> Vec<Annotation> {
        let n = frame.len();
        let bars = frame.bars();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let floor = rolling_min(&lows, FLOOR_WINDOW);
        let mut annotations = vec![Annotation::default(); n];

        let mut buy_index: Option<usize> = None;
        let mut entry_floor = f64::NAN;

        for i in SLOW_WARMUP..=n - 2 {
            let open_change = (bars[i].open - bars[i - 1].close) / bars[i - 1].close;
            let min_gap = (i - LOOKBACK..i)
                .map(|j| frame.dif[j] - frame.dea[j])
                .fold(f64::INFINITY, f64::min);

            if golden_cross(&frame.dif, &frame.dea, i)
                && min_gap < DEEP_GAP_THRESHOLD
                && open_change <= HIGH_OPEN_THRESHOLD
            {
                annotations[i + 1] = Annotation::new(Signal::Buy, REASON_DEEP_GAP_BUY);
                buy_index = Some(i + 1);
                entry_floor = floor[i];
            } else if let Some(entry) = buy_index {
                let bars_since_buy = i.saturating_sub(entry);
                let in_window = bars_since_buy <= HOLDING_PERIOD;
                let low = bars[i].low;

                let entry_floor_breach = in_window && low < entry_floor;
                let current_floor_breach = !in_window && low < floor[i];
                let macd_strength = frame.dif[i] - frame.dea[i] > STRENGTH_THRESHOLD;

                if entry_floor_breach || current_floor_breach || macd_strength {
                    let reason = if entry_floor_breach {
                        REASON_ENTRY_FLOOR_BREACH
                    } else if current_floor_breach {
                        REASON_CURRENT_FLOOR_BREACH
                    } else {
                        REASON_MACD_STRENGTH
                    };
                    annotations[i + 1] = Annotation::new(Signal::Sell, reason);
                    buy_index = None;
                    entry_floor = f64::NAN;
                } else {
                    annotations[i + 1] = Annotation::new(Signal::Hold, REASON_OBSERVE);
                }
            } else {
                annotations[i + 1] = Annotation::new(Signal::Hold, REASON_OBSERVE);
            }
        }

        annotations
    }
}

impl Strategy for DeepdownStop {
    fn name(&self) -> &str {
        "deepdown_stop"
    }

    fn generate_signals(&self, series: &BarSeries) -> Result<SignalFrame, StrategyError> {
        ensure_history(self.name(), series.len())?;
        let mut frame = SignalFrame::from_series(series, self.params);
        let annotations = self.decide(&frame);
        frame.set_annotations(annotations);
        Ok(frame)
    }
}
