//! CSV bar loading for the runner.
//!
//! `CsvBarSource` resolves an instrument code to `<data_dir>/<code>.csv` and
//! parses daily bars with columns `trade_date,open,high,low,close`. Rows
//! outside the requested range are dropped before validation, so a file may
//! span years while a run looks at one slice of it.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use macdlab_core::data::{BarSource, DataError, DateRange};
use macdlab_core::domain::{Bar, BarSeries};

/// Bar source backed by one CSV file per instrument.
#[derive(Debug, Clone)]
pub struct CsvBarSource {
    data_dir: PathBuf,
}

/// One CSV row before validation.
#[derive(Debug, Deserialize)]
struct CsvRow {
    trade_date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl CsvBarSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, code: &str) -> PathBuf {
        self.data_dir.join(format!("{code}.csv"))
    }

    fn read_rows(&self, code: &str, path: &Path) -> Result<Vec<CsvRow>, DataError> {
        let file = std::fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DataError::InstrumentNotFound {
                    code: code.to_string(),
                }
            } else {
                DataError::Io(format!("{}: {e}", path.display()))
            }
        })?;

        let mut reader = csv::Reader::from_reader(file);
        let mut rows = Vec::new();
        for record in reader.deserialize() {
            let row: CsvRow = record
                .map_err(|e| DataError::MalformedRecord(format!("{code}: {e}")))?;
            rows.push(row);
        }
        Ok(rows)
    }
}

impl BarSource for CsvBarSource {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, code: &str, range: DateRange) -> Result<BarSeries, DataError> {
        let path = self.path_for(code);
        let rows = self.read_rows(code, &path)?;

        let bars: Vec<Bar> = rows
            .into_iter()
            .filter(|row| range.contains(row.trade_date))
            .map(|row| Bar {
                trade_date: row.trade_date,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
            })
            .collect();

        Ok(BarSeries::new(bars)?)
    }
}
