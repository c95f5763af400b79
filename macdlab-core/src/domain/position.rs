//! Position — simulator-owned flat/long state machine.

use serde::{Deserialize, Serialize};

/// Mutable position state. Flat when `shares == 0.0`.
///
/// Transitions only on buy/sell signals encountered during replay; every
/// backtest invocation starts from a fresh flat position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub shares: f64,
    pub entry_price: f64,
}

impl Position {
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn is_long(&self) -> bool {
        self.shares > 0.0
    }

    /// Open a long position at `price` with `shares` shares.
    pub fn open(&mut self, price: f64, shares: f64) {
        self.entry_price = price;
        self.shares = shares;
    }

    /// Close the position, returning `(proceeds, profit)` at `price`.
    pub fn close(&mut self, price: f64) -> (f64, f64) {
        let proceeds = self.shares * price;
        let profit = proceeds - self.shares * self.entry_price;
        self.shares = 0.0;
        (proceeds, profit)
    }

    /// Mark-to-market value of the held shares at `price`.
    pub fn market_value(&self, price: f64) -> f64 {
        self.shares * price
    }
}
