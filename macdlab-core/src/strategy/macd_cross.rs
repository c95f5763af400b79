//! Plain MACD crossover strategy.
//!
//! Buy on a golden cross, sell on a death cross, otherwise observe. No
//! position tracking: every cross is reported regardless of holdings; the
//! simulator's flat/long state machine decides which signals are executable.

use crate::domain::{Annotation, BarSeries, Signal};
use crate::indicators::MacdParams;

use super::{
    death_cross, ensure_history, golden_cross, SignalFrame, Strategy, StrategyError,
    REASON_OBSERVE, SLOW_WARMUP,
};

pub const REASON_GOLDEN_CROSS: &str = "MACD golden cross today, buy at tomorrow's open";
pub const REASON_DEATH_CROSS: &str = "MACD death cross today, sell at tomorrow's open";

/// MACD crossover signal strategy.
#[derive(Debug, Clone, Default)]
pub struct MacdCross {
    params: MacdParams,
}

impl MacdCross {
    pub fn new(params: MacdParams) -> Self {
        Self { params }
    }

    fn decide(&self, frame: &SignalFrame) -> Vec<Annotation> {
        let n = frame.len();
        let mut annotations = vec![Annotation::default(); n];

        for i in SLOW_WARMUP..=n - 2 {
            if golden_cross(&frame.dif, &frame.dea, i) {
                annotations[i + 1] = Annotation::new(Signal::Buy, REASON_GOLDEN_CROSS);
            } else if death_cross(&frame.dif, &frame.dea, i) {
                annotations[i + 1] = Annotation::new(Signal::Sell, REASON_DEATH_CROSS);
            } else {
                annotations[i + 1] = Annotation::new(Signal::Hold, REASON_OBSERVE);
            }
        }

        annotations
    }
}

impl Strategy for MacdCross {
    fn name(&self) -> &str {
        "macd_cross"
    }

    fn generate_signals(&self, series: &BarSeries) -> Result<SignalFrame, StrategyError> {
        ensure_history(self.name(), series.len())?;
        let mut frame = SignalFrame::from_series(series, self.params);
        let annotations = self.decide(&frame);
        frame.set_annotations(annotations);
        Ok(frame)
    }
}
