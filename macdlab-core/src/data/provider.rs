//! Bar source trait and structured error types.
//!
//! `BarSource` abstracts over where daily bars come from (CSV files on disk,
//! a remote quote API, in-memory fixtures for tests) so the strategy and
//! simulator layers never touch I/O directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{BarSeries, Code, SeriesError};

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("instrument not found: {code}")]
    InstrumentNotFound { code: Code },

    #[error("I/O error: {0}")]
    Io(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Series(#[from] SeriesError),
}

/// Inclusive calendar date range for a bar query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DataError> {
        if start > end {
            return Err(DataError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Trait for daily bar sources.
///
/// Implementations handle the specifics of one storage or transport; the
/// returned series is already sorted and validated.
pub trait BarSource {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch daily bars for an instrument over a date range.
    fn fetch(&self, code: &str, range: DateRange) -> Result<BarSeries, DataError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        let err = DateRange::new(d(2024, 6, 1), d(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, DataError::InvalidRange { .. }));
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 6, 1)).unwrap();
        assert!(range.contains(d(2024, 1, 1)));
        assert!(range.contains(d(2024, 6, 1)));
        assert!(range.contains(d(2024, 3, 15)));
        assert!(!range.contains(d(2023, 12, 31)));
        assert!(!range.contains(d(2024, 6, 2)));
    }

    #[test]
    fn single_day_range_is_valid() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 1)).unwrap();
        assert!(range.contains(d(2024, 1, 1)));
    }
}
