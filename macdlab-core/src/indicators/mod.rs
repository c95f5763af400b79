//! Indicator engine — pure, stateless derivations from a price series.
//!
//! Everything here is a pure function of its input slice and parameters:
//! no incremental state, full recompute on every call. Warm-up prefixes are
//! NaN where a window has not yet filled; callers decide how much history
//! a strategy needs before signals are stable.

pub mod ewm;
pub mod macd;
pub mod rolling;
pub mod rsi;

pub use ewm::ewm_span;
pub use macd::{compute_macd, MacdParams, MacdSeries};
pub use rolling::rolling_min;
pub use rsi::compute_rsi;

/// Create synthetic bars from close prices for testing.
///
/// open = prev close (or close for the first bar), high/low bracket the
/// open/close pair by 1.0, dates are consecutive days from 2024-01-02.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                trade_date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
