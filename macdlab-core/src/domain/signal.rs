//! Trading signal and per-bar annotation.

use serde::{Deserialize, Serialize};

/// Per-bar trading signal. Wire values: buy = 1, hold = 0, sell = -1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Sell,
    #[default]
    Hold,
    Buy,
}

impl Signal {
    pub fn as_i8(&self) -> i8 {
        match self {
            Signal::Sell => -1,
            Signal::Hold => 0,
            Signal::Buy => 1,
        }
    }

    pub fn is_actionable(&self) -> bool {
        !matches!(self, Signal::Hold)
    }
}

/// Signal plus human-readable rationale for one bar.
///
/// A strategy decides on bar `i` and writes the annotation to bar `i + 1`
/// ("decide after close, execute at next open"). The final bar's annotation
/// is therefore never executed within the series; it is the next-day
/// recommendation surfaced by `predict_next`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub signal: Signal,
    pub reason: String,
}

impl Annotation {
    pub fn new(signal: Signal, reason: impl Into<String>) -> Self {
        Self {
            signal,
            reason: reason.into(),
        }
    }
}
