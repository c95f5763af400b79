//! Relative Strength Index over a simple rolling mean (not Wilder smoothing).
//!
//! Gains and losses come from day-over-day close differences; both are
//! averaged with a plain rolling mean over `period` bars.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//!
//! Output is NaN for the first `period` bars (window not yet full) and NaN
//! whenever the rolling average loss is exactly zero: the ratio is undefined
//! there and the divide-by-zero is propagated as "undefined", never clamped
//! and never a crash.

/// Compute RSI over closing prices. Output is index-aligned with the input.
pub fn compute_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "RSI period must be >= 1");

    let n = closes.len();
    let mut result = vec![f64::NAN; n];
    if n < period + 1 {
        return result;
    }

    // Day-over-day gains and losses; index 0 has no prior close.
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let delta = closes[i] - closes[i - 1];
        if delta > 0.0 {
            gains[i] = delta;
        } else {
            losses[i] = -delta;
        }
    }

    for i in period..n {
        let window = (i + 1 - period)..=i;
        let avg_gain: f64 = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss: f64 = losses[window].iter().sum::<f64>() / period as f64;

        if avg_loss == 0.0 {
            // Undefined ratio: leave NaN.
            continue;
        }
        result[i] = 100.0 - 100.0 / (1.0 + avg_gain / avg_loss);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn rsi_warmup_prefix_is_nan() {
        let closes = [44.0, 44.3, 44.1, 43.6, 44.3, 44.8, 45.1, 45.4];
        let rsi = compute_rsi(&closes, 3);
        for &v in &rsi[..3] {
            assert!(v.is_nan());
        }
    }

    #[test]
    fn rsi_undefined_when_average_loss_is_zero() {
        // Monotonically rising closes: every delta is a gain, avg_loss == 0.
        let closes = [100.0, 101.0, 102.0, 103.0, 104.0, 105.0];
        let rsi = compute_rsi(&closes, 3);
        assert!(rsi.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn rsi_zero_when_all_losses() {
        let closes = [105.0, 104.0, 103.0, 102.0, 101.0, 100.0];
        let rsi = compute_rsi(&closes, 3);
        // avg_gain == 0, avg_loss > 0 -> RSI = 0.
        assert_approx(rsi[3], 0.0, 1e-9);
        assert_approx(rsi[5], 0.0, 1e-9);
    }

    #[test]
    fn rsi_known_mixed_values() {
        // closes: 44, 44.34, 44.09, 43.61, 44.33
        // deltas: +0.34, -0.25, -0.48, +0.72
        // period=3 at i=3: gains = 0.34, losses = 0.25 + 0.48 = 0.73
        // avg_gain = 0.34/3, avg_loss = 0.73/3
        // RSI = 100 - 100/(1 + 0.34/0.73) = 31.7757...
        let closes = [44.0, 44.34, 44.09, 43.61, 44.33];
        let rsi = compute_rsi(&closes, 3);
        assert_approx(rsi[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_bounded_where_defined() {
        let closes = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0];
        let rsi = compute_rsi(&closes, 3);
        for (i, &v) in rsi.iter().enumerate() {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {i}: {v}");
            }
        }
    }

    #[test]
    fn rsi_too_short_input_is_all_nan() {
        let rsi = compute_rsi(&[100.0, 101.0], 14);
        assert!(rsi.iter().all(|v| v.is_nan()));
    }
}
