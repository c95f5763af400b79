//! Sequential pool analysis.
//!
//! Runs the configured strategy across every instrument in the pool. One
//! instrument failing (missing file, malformed rows, too little history)
//! never aborts the run: the failure is recorded and the pool moves on.
//! Results are filtered against the configured bounds and ranked by total
//! return, best first.

use serde::{Deserialize, Serialize};

use macdlab_core::backtest::{run_backtest, TradingStats};
use macdlab_core::data::{BarSource, DateRange};
use macdlab_core::domain::TradeRecord;
use macdlab_core::strategy::Prediction;

use crate::config::{Filters, PoolConfig};

/// Outcome for one instrument that completed the full pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolResult {
    pub code: String,
    pub name: String,
    pub strategy: String,
    /// Total return in percent of initial cash.
    pub total_return: f64,
    /// Annualized return as a fraction; NaN when not annualizable.
    /// Non-finite values export as JSON null and read back as NaN.
    #[serde(with = "nullable_float")]
    pub annual_return: f64,
    pub final_value: f64,
    /// May be infinite (no losses) or NaN (no trades); exports as null.
    #[serde(with = "nullable_float")]
    pub profit_loss_ratio: f64,
    pub stats: TradingStats,
    /// Next-day recommendation read from the final annotation slot.
    pub prediction: Prediction,
    pub trades: Vec<TradeRecord>,
}

/// One instrument that failed somewhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolFailure {
    pub code: String,
    pub error: String,
}

/// Full outcome of a pool run: ranked survivors plus isolated failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolReport {
    pub results: Vec<PoolResult>,
    pub failures: Vec<PoolFailure>,
}

/// Run the configured strategy over every instrument in the pool.
pub fn analyze_pool(config: &PoolConfig, source: &dyn BarSource) -> PoolReport {
    let range = DateRange {
        start: config.start_date,
        end: config.end_date,
    };

    let mut results = Vec::new();
    let mut failures = Vec::new();

    for instrument in &config.instruments {
        match analyze_one(config, source, range, instrument.code.as_str()) {
            Ok(mut result) => {
                result.name = instrument.name.clone();
                if passes_filters(&result, &config.filters) {
                    results.push(result);
                }
            }
            Err(error) => failures.push(PoolFailure {
                code: instrument.code.clone(),
                error,
            }),
        }
    }

    // Rank best first. total_return is always finite, so total_cmp is a plain descending sort.
    results.sort_by(|a, b| b.total_return.total_cmp(&a.total_return));

    PoolReport { results, failures }
}

fn analyze_one(
    config: &PoolConfig,
    source: &dyn BarSource,
    range: DateRange,
    code: &str,
) -> Result<PoolResult, String> {
    let strategy = config.strategy.build();

    let series = source.fetch(code, range).map_err(|e| e.to_string())?;
    let frame = strategy
        .generate_signals(&series)
        .map_err(|e| e.to_string())?;
    let report = run_backtest(&frame, config.initial_cash).map_err(|e| e.to_string())?;
    let prediction = strategy.predict_next(&frame);

    Ok(PoolResult {
        code: code.to_string(),
        name: String::new(),
        strategy: strategy.name().to_string(),
        total_return: report.total_return_pct,
        annual_return: report.annual_return,
        final_value: report.final_value,
        profit_loss_ratio: report.stats.profit_loss_ratio(),
        stats: report.stats,
        prediction,
        trades: report.trades,
    })
}

/// JSON has no NaN or infinity; map non-finite floats to null on the way
/// out and back to NaN on the way in.
mod nullable_float {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

fn passes_filters(result: &PoolResult, filters: &Filters) -> bool {
    if let Some(min) = filters.min_total_return {
        if !(result.total_return >= min) {
            return false;
        }
    }
    if let Some(min) = filters.min_profit_loss_ratio {
        // NaN ratio (no trades at all) never clears a bound; infinite does.
        if !(result.profit_loss_ratio >= min) {
            return false;
        }
    }
    true
}
