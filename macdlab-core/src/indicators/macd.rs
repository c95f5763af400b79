//! MACD — dif (fast EMA minus slow EMA), dea (EMA of dif), histogram.
//!
//! dif = ewm(close, fast) - ewm(close, slow)
//! dea = ewm(dif, signal)
//! hist = 2 * (dif - dea)
//!
//! All three series are the same length as the input and finite for any
//! non-empty finite input (first-value-seeded EWM has no NaN warm-up).
//! Values before the slow span has seen enough data are still unstable;
//! strategies gate on their own warm-up window.

use super::ewm_span;
use serde::{Deserialize, Serialize};

/// MACD spans. Defaults are the conventional 12/26/9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
        }
    }
}

/// Per-bar MACD outputs, index-aligned with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub dif: Vec<f64>,
    pub dea: Vec<f64>,
    pub hist: Vec<f64>,
}

/// Compute MACD over closing prices.
pub fn compute_macd(closes: &[f64], params: MacdParams) -> MacdSeries {
    let fast = ewm_span(closes, params.fast);
    let slow = ewm_span(closes, params.slow);

    let dif: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let dea = ewm_span(&dif, params.signal);
    let hist: Vec<f64> = dif.iter().zip(&dea).map(|(d, e)| 2.0 * (d - e)).collect();

    MacdSeries { dif, dea, hist }
}
