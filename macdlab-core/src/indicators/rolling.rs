//! Rolling window minimum.
//!
//! NaN until the window fills (first `window - 1` outputs). Used for the
//! 20-day protective floor in the deep-drawdown stop strategy.

/// Rolling minimum of `values` over `window` bars, index-aligned with input.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "rolling window must be >= 1");

    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in (window - 1)..n {
        let mut min = f64::INFINITY;
        for &v in &values[(i + 1 - window)..=i] {
            if v < min {
                min = v;
            }
        }
        result[i] = min;
    }
    result
}
