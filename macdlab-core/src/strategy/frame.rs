//! SignalFrame — bars plus their indicator series and per-bar annotations.

use crate::domain::{Annotation, Bar, BarSeries, Signal};
use crate::indicators::{compute_macd, compute_rsi, MacdParams, MacdSeries};

use super::RSI_PERIOD;

/// Output of a strategy run: the validated bars, their MACD/RSI series, and
/// one annotation slot per bar.
///
/// Annotations are preallocated to the full series length and only ever
/// written in bounds at index `i + 1`; no slot grows the frame. The indicator
/// vectors are index-aligned with `bars()`.
#[derive(Debug, Clone)]
pub struct SignalFrame {
    bars: Vec<Bar>,
    pub dif: Vec<f64>,
    pub dea: Vec<f64>,
    pub hist: Vec<f64>,
    pub rsi: Vec<f64>,
    annotations: Vec<Annotation>,
}

impl SignalFrame {
    /// Build a frame from a validated series: full indicator recompute, all
    /// annotation slots initialized to hold.
    pub(crate) fn from_series(series: &BarSeries, params: MacdParams) -> Self {
        let closes = series.closes();
        let MacdSeries { dif, dea, hist } = compute_macd(&closes, params);
        let rsi = compute_rsi(&closes, RSI_PERIOD);
        let bars = series.bars().to_vec();
        let annotations = vec![Annotation::default(); bars.len()];
        debug_assert!(!bars.is_empty());
        Self {
            bars,
            dif,
            dea,
            hist,
            rsi,
            annotations,
        }
    }

    /// Replace the annotation slots wholesale. Length must match the bars.
    pub(crate) fn set_annotations(&mut self, annotations: Vec<Annotation>) {
        assert_eq!(
            annotations.len(),
            self.bars.len(),
            "annotation slots must match bar count"
        );
        self.annotations = annotations;
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn signal(&self, i: usize) -> Signal {
        self.annotations[i].signal
    }

    pub fn reason(&self, i: usize) -> &str {
        &self.annotations[i].reason
    }

    /// Build a frame with scripted indicator paths for strategy tests.
    #[cfg(test)]
    pub(crate) fn scripted(bars: Vec<Bar>, dif: Vec<f64>, dea: Vec<f64>) -> Self {
        assert_eq!(bars.len(), dif.len());
        assert_eq!(bars.len(), dea.len());
        let hist: Vec<f64> = dif.iter().zip(&dea).map(|(d, e)| 2.0 * (d - e)).collect();
        let rsi = vec![f64::NAN; bars.len()];
        let annotations = vec![Annotation::default(); bars.len()];
        Self {
            bars,
            dif,
            dea,
            hist,
            rsi,
            annotations,
        }
    }
}
