//! Data source boundary: the `BarSource` trait and its error types.

pub mod provider;

pub use provider::{BarSource, DataError, DateRange};
