//! MACDLab Core — domain types, indicator engine, signal strategies, backtest simulator.
//!
//! This crate contains the heart of the signal-generation and backtesting engine:
//! - Domain types (bars, validated bar series, signals, trades, positions)
//! - Indicator engine (first-value-seeded EMA, MACD, rolling-mean RSI)
//! - Signal strategy variants behind a common `Strategy` trait
//! - Flat/long backtest simulator with trade ledger and statistics
//! - `BarSource` boundary trait for external data collaborators
//!
//! The core is fully synchronous and deterministic: given the same bar series
//! and strategy parameters, signals, trades, and statistics are bit-for-bit
//! reproducible.

pub mod backtest;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod strategy;
