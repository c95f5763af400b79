//! BarSeries — validated, date-ordered bar sequence.
//!
//! External bar sources may return data in any order, so the constructor
//! sorts defensively by trade date before validating. Duplicate dates are an
//! error rather than deduped: dropping a bar silently would change which bar
//! owns which signal.

use super::Bar;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors from bar series validation.
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("bar series is empty")]
    Empty,

    #[error("duplicate trade date {date} in bar series")]
    DuplicateDate { date: NaiveDate },

    #[error("bar at {date} failed sanity check (inconsistent OHLC or non-positive price)")]
    InsaneBar { date: NaiveDate },
}

/// Owning wrapper over a bar sequence with strictly ascending unique dates.
#[derive(Debug, Clone)]
pub struct BarSeries {
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Sort bars by trade date (stable) and validate the result.
    ///
    /// Fails fast on empty input, duplicate dates, and insane OHLC values.
    /// Post-condition: `bars()` is strictly ascending by `trade_date`.
    pub fn new(mut bars: Vec<Bar>) -> Result<Self, SeriesError> {
        if bars.is_empty() {
            return Err(SeriesError::Empty);
        }
        bars.sort_by_key(|b| b.trade_date);
        for pair in bars.windows(2) {
            if pair[0].trade_date == pair[1].trade_date {
                return Err(SeriesError::DuplicateDate {
                    date: pair[0].trade_date,
                });
            }
        }
        for bar in &bars {
            if !bar.is_sane() {
                return Err(SeriesError::InsaneBar {
                    date: bar.trade_date,
                });
            }
        }
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Daily lows in date order.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Consume the series, yielding the validated bars.
    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}
