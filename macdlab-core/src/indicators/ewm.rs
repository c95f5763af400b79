//! Exponentially weighted mean seeded by the first value.
//!
//! Recursive: ewm[t] = alpha * v[t] + (1 - alpha) * ewm[t-1], alpha = 2 / (span + 1).
//! Seed: ewm[0] = v[0].
//!
//! This is the "adjust=false" flavor: no SMA warm-up seed, every output is
//! defined from index 0. MACD dif/dea are built from it.

/// Compute the span-parameterized EWM of `values`.
///
/// Empty input yields an empty output. `span` must be >= 1.
pub fn ewm_span(values: &[f64], span: usize) -> Vec<f64> {
    assert!(span >= 1, "EWM span must be >= 1");

    let n = values.len();
    let mut result = Vec::with_capacity(n);
    if n == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[0];
    result.push(prev);
    for &v in &values[1..] {
        let ewm = alpha * v + (1.0 - alpha) * prev;
        result.push(ewm);
        prev = ewm;
    }

    result
}
