//! Domain types for MACDLab.

pub mod bar;
pub mod position;
pub mod series;
pub mod signal;
pub mod trade;

pub use bar::Bar;
pub use position::Position;
pub use series::{BarSeries, SeriesError};
pub use signal::{Annotation, Signal};
pub use trade::{TradeAction, TradeRecord};

/// Instrument code type alias (e.g. "600919.SH").
pub type Code = String;
