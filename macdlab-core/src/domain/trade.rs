//! TradeRecord — one entry in the append-only trade ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    Buy,
    Sell,
}

/// Immutable log entry created each time the position transitions.
///
/// `return_rate` is percent relative to the matching entry price (0 for
/// buys). `profit` is currency P&L realized by a sell (0 for buys).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub price: f64,
    pub shares: f64,
    pub profit: f64,
    pub return_rate: f64,
    pub reason: String,
}

impl TradeRecord {
    pub fn is_sell(&self) -> bool {
        self.action == TradeAction::Sell
    }

    pub fn is_profitable(&self) -> bool {
        self.is_sell() && self.profit > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sell() -> TradeRecord {
        TradeRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
            action: TradeAction::Sell,
            price: 110.0,
            shares: 1000.0,
            profit: 10_000.0,
            return_rate: 10.0,
            reason: "MACD death cross today, sell at next open".into(),
        }
    }

    #[test]
    fn sell_with_positive_profit_is_profitable() {
        assert!(sample_sell().is_profitable());
    }

    #[test]
    fn buy_is_never_profitable() {
        let mut trade = sample_sell();
        trade.action = TradeAction::Buy;
        trade.profit = 0.0;
        trade.return_rate = 0.0;
        assert!(!trade.is_profitable());
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let trade = sample_sell();
        let json = serde_json::to_string(&trade).unwrap();
        let deser: TradeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, deser);
    }
}
