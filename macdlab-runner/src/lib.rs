//! MACDLab Runner — pool analysis orchestration on top of `macdlab-core`.
//!
//! This crate builds on `macdlab-core` to provide:
//! - TOML pool configuration (instruments, strategy, capital, filters)
//! - CSV bar loading behind the core `BarSource` trait
//! - Sequential pool analysis with per-instrument failure isolation
//! - JSON and CSV report export

pub mod config;
pub mod data_loader;
pub mod export;
pub mod pool;

pub use config::{ConfigError, Filters, InstrumentSpec, PoolConfig, StrategySpec};
pub use data_loader::CsvBarSource;
pub use export::{export_report_json, export_trades_csv, save_artifacts};
pub use pool::{analyze_pool, PoolFailure, PoolReport, PoolResult};
