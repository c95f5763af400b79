//! Serializable pool configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use macdlab_core::strategy::{DeepdownStop, MacdCross, OptimizedExit, Strategy};

/// Errors from loading or validating a pool configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for one pool analysis run.
///
/// Captures everything needed to reproduce the run: the instrument pool,
/// the strategy variant and its parameters, the date range, the initial
/// capital, and the ranking filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Analysis start date (inclusive).
    pub start_date: NaiveDate,

    /// Analysis end date (inclusive).
    pub end_date: NaiveDate,

    /// Initial cash per instrument.
    pub initial_cash: f64,

    /// Strategy variant applied to every instrument.
    pub strategy: StrategySpec,

    /// Instruments to analyze.
    pub instruments: Vec<InstrumentSpec>,

    /// Result filters, applied after the backtest.
    #[serde(default)]
    pub filters: Filters,
}

/// One instrument in the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    pub code: String,
    #[serde(default)]
    pub name: String,
}

/// Strategy variant selection (serializable enum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategySpec {
    /// Plain MACD crossover: golden cross buys, death cross sells.
    MacdCross,

    /// Crossover with take-profit / stop-loss / early-exit rules.
    OptimizedExit {
        take_profit_pct: f64,
        stop_loss_pct: f64,
    },

    /// Deep-drawdown gated crossover with a 20-day floor stop.
    DeepdownStop,
}

impl StrategySpec {
    /// Instantiate the configured strategy variant.
    pub fn build(&self) -> Box<dyn Strategy> {
        match self {
            StrategySpec::MacdCross => Box::new(MacdCross::default()),
            StrategySpec::OptimizedExit {
                take_profit_pct,
                stop_loss_pct,
            } => Box::new(OptimizedExit::new(*take_profit_pct, *stop_loss_pct)),
            StrategySpec::DeepdownStop => Box::new(DeepdownStop::default()),
        }
    }
}

/// Post-backtest result filters. A result must clear every set bound to
/// appear in the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    /// Minimum total return in percent.
    pub min_total_return: Option<f64>,

    /// Minimum profitable-to-losing trade ratio.
    pub min_profit_loss_ratio: Option<f64>,
}

impl PoolConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: PoolConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.start_date > self.end_date {
            return Err(ConfigError::Invalid(format!(
                "start_date {} is after end_date {}",
                self.start_date, self.end_date
            )));
        }
        if self.initial_cash <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_cash must be positive, got {}",
                self.initial_cash
            )));
        }
        if self.instruments.is_empty() {
            return Err(ConfigError::Invalid("instrument pool is empty".into()));
        }
        if let StrategySpec::OptimizedExit {
            take_profit_pct,
            stop_loss_pct,
        } = &self.strategy
        {
            if *take_profit_pct <= 0.0 || *stop_loss_pct <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "take_profit_pct and stop_loss_pct must be positive, got {take_profit_pct} and {stop_loss_pct}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
start_date = "2023-01-03"
end_date = "2024-01-03"
initial_cash = 100000.0

[strategy]
type = "optimized_exit"
take_profit_pct = 0.10
stop_loss_pct = 0.05

[[instruments]]
code = "600919"
name = "Jiangsu Bank"

[[instruments]]
code = "601318"

[filters]
min_total_return = 10.0
min_profit_loss_ratio = 2.0
"#;

    #[test]
    fn parses_a_full_config() {
        let config = PoolConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.instruments.len(), 2);
        assert_eq!(config.instruments[0].code, "600919");
        assert_eq!(config.instruments[0].name, "Jiangsu Bank");
        assert_eq!(config.instruments[1].name, "");
        assert_eq!(
            config.strategy,
            StrategySpec::OptimizedExit {
                take_profit_pct: 0.10,
                stop_loss_pct: 0.05,
            }
        );
        assert_eq!(config.filters.min_total_return, Some(10.0));
    }

    #[test]
    fn filters_default_to_none() {
        let text = r#"
start_date = "2023-01-03"
end_date = "2024-01-03"
initial_cash = 100000.0

[strategy]
type = "macd_cross"

[[instruments]]
code = "600919"
"#;
        let config = PoolConfig::from_toml(text).unwrap();
        assert_eq!(config.filters, Filters::default());
        assert_eq!(config.strategy, StrategySpec::MacdCross);
    }

    #[test]
    fn rejects_inverted_date_range() {
        let text = SAMPLE.replace("2024-01-03", "2022-01-03");
        let err = PoolConfig::from_toml(&text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_cash() {
        let text = SAMPLE.replace("100000.0", "0.0");
        let err = PoolConfig::from_toml(&text).unwrap_err();
        assert!(err.to_string().contains("initial_cash"));
    }

    #[test]
    fn rejects_empty_pool() {
        let text = r#"
start_date = "2023-01-03"
end_date = "2024-01-03"
initial_cash = 100000.0
instruments = []

[strategy]
type = "macd_cross"
"#;
        let err = PoolConfig::from_toml(text).unwrap_err();
        assert!(err.to_string().contains("pool is empty"));
    }

    #[test]
    fn rejects_non_positive_exit_thresholds() {
        let text = SAMPLE.replace("stop_loss_pct = 0.05", "stop_loss_pct = -0.05");
        let err = PoolConfig::from_toml(&text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_strategy_tag() {
        let text = SAMPLE.replace("optimized_exit", "momentum_roc");
        let err = PoolConfig::from_toml(&text).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn strategy_spec_builds_the_named_variant() {
        assert_eq!(StrategySpec::MacdCross.build().name(), "macd_cross");
        assert_eq!(
            StrategySpec::OptimizedExit {
                take_profit_pct: 0.1,
                stop_loss_pct: 0.05
            }
            .build()
            .name(),
            "optimized_exit"
        );
        assert_eq!(StrategySpec::DeepdownStop.build().name(), "deepdown_stop");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = PoolConfig::from_toml(SAMPLE).unwrap();
        let text = toml::to_string(&config).unwrap();
        let restored = PoolConfig::from_toml(&text).unwrap();
        assert_eq!(config, restored);
    }
}
