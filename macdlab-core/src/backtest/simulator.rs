//! Signal replay: all-in/all-out flat/long simulation at bar opens.
//!
//! The final bar of the frame is dropped before replay: its annotation is
//! the next-day recommendation and is not executable within this series.
//! Buys convert all cash to shares at the bar's open; sells convert all
//! shares back at the bar's open. Mark-to-market runs every bar at the
//! close, and drawdown is measured against the initial capital baseline.

use crate::domain::{Position, Signal, TradeAction, TradeRecord};
use crate::strategy::SignalFrame;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TradingStats;

/// Errors from the simulator.
#[derive(Debug, Error)]
pub enum BacktestError {
    #[error("backtest requires at least 2 bars (the final bar carries the next-day signal), got {0}")]
    InsufficientBars(usize),

    #[error("initial cash must be positive, got {0}")]
    NonPositiveCash(f64),
}

/// Complete result of one simulator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub final_value: f64,
    /// Total return in percent of initial cash.
    pub total_return_pct: f64,
    /// Annualized return as a fraction; NaN when the retained bars span
    /// zero calendar days (non-annualizable).
    pub annual_return: f64,
    pub trades: Vec<TradeRecord>,
    pub stats: TradingStats,
}

/// Replay an annotated frame against an initial cash balance.
pub fn run_backtest(frame: &SignalFrame, initial_cash: f64) -> Result<BacktestReport, BacktestError> {
    if frame.len() < 2 {
        return Err(BacktestError::InsufficientBars(frame.len()));
    }
    if initial_cash <= 0.0 {
        return Err(BacktestError::NonPositiveCash(initial_cash));
    }

    // The last bar carries tomorrow's signal; it is not executable here.
    let retained = frame.len() - 1;
    let bars = &frame.bars()[..retained];
    let annotations = &frame.annotations()[..retained];

    let mut cash = initial_cash;
    let mut position = Position::flat();
    let mut trades: Vec<TradeRecord> = Vec::new();
    let mut total_profit = 0.0;
    // Most negative deviation below the initial capital baseline, as a fraction.
    let mut max_drawdown = 0.0;

    for (bar, ann) in bars.iter().zip(annotations) {
        match ann.signal {
            Signal::Buy if cash > 0.0 => {
                let shares = cash / bar.open;
                position.open(bar.open, shares);
                cash = 0.0;
                trades.push(TradeRecord {
                    date: bar.trade_date,
                    action: TradeAction::Buy,
                    price: bar.open,
                    shares,
                    profit: 0.0,
                    return_rate: 0.0,
                    reason: ann.reason.clone(),
                });
            }
            Signal::Sell if position.is_long() => {
                let entry = position.entry_price;
                let shares = position.shares;
                let (proceeds, profit) = position.close(bar.open);
                total_profit += profit;
                cash = proceeds;
                trades.push(TradeRecord {
                    date: bar.trade_date,
                    action: TradeAction::Sell,
                    price: bar.open,
                    shares,
                    profit,
                    return_rate: (bar.open - entry) / entry * 100.0,
                    reason: ann.reason.clone(),
                });
            }
            _ => {}
        }

        let current_value = cash + position.market_value(bar.close);
        if current_value < initial_cash {
            let drawdown = (current_value - initial_cash) / initial_cash;
            if drawdown < max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    let last = &bars[retained - 1];
    let final_value = cash + position.market_value(last.close);
    let total_return_pct = (final_value - initial_cash) / initial_cash * 100.0;

    let elapsed_days = (last.trade_date - bars[0].trade_date).num_days();
    let annual_return = if elapsed_days == 0 {
        f64::NAN
    } else {
        (1.0 + total_return_pct / 100.0).powf(365.0 / elapsed_days as f64) - 1.0
    };

    let stats = TradingStats::from_trades(&trades, total_profit, max_drawdown * 100.0);

    Ok(BacktestReport {
        final_value,
        total_return_pct,
        annual_return,
        trades,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Annotation, Bar};
    use crate::indicators::assert_approx;
    use chrono::NaiveDate;

    fn bar(day: u32, open: f64, close: f64) -> Bar {
        let lo = open.min(close);
        let hi = open.max(close);
        Bar {
            trade_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Duration::days(day as i64 - 1),
            open,
            high: hi + 1.0,
            low: lo - 1.0,
            close,
        }
    }

    /// Frame with explicit bars and buy/sell annotations at given indices.
    fn frame(bars: Vec<Bar>, signals: &[(usize, Signal)]) -> SignalFrame {
        let n = bars.len();
        let mut frame = SignalFrame::scripted(bars, vec![0.0; n], vec![0.0; n]);
        let mut annotations = vec![Annotation::default(); n];
        for &(i, s) in signals {
            annotations[i] = Annotation::new(s, "test signal");
        }
        frame.set_annotations(annotations);
        frame
    }

    #[test]
    fn buy_executes_at_open_of_signal_bar() {
        // Golden cross detected on day 2 is assigned to day 3; the buy pays
        // day 3's open of 10.6.
        let bars = vec![
            bar(1, 10.0, 10.0),
            bar(2, 10.0, 10.5),
            bar(3, 10.6, 10.7),
            bar(4, 10.7, 10.8), // next-day slot, dropped
        ];
        let report = frame(bars, &[(2, Signal::Buy)]);
        let report = run_backtest(&report, 100_000.0).unwrap();

        assert_eq!(report.trades.len(), 1);
        let first = &report.trades[0];
        assert_eq!(first.action, TradeAction::Buy);
        assert_eq!(first.price, 10.6);
        assert_eq!(
            first.date,
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
        );
    }

    #[test]
    fn round_trip_return_rate_uses_the_two_opens() {
        let bars = vec![
            bar(1, 100.0, 100.0),
            bar(2, 100.0, 102.0),
            bar(3, 101.0, 103.0), // buy at open 101
            bar(4, 104.0, 105.0),
            bar(5, 106.0, 106.5), // sell at open 106
            bar(6, 106.0, 106.0), // dropped
        ];
        let f = frame(bars, &[(2, Signal::Buy), (4, Signal::Sell)]);
        let report = run_backtest(&f, 100_000.0).unwrap();

        assert_eq!(report.stats.total_trades, 1);
        assert_eq!(report.trades.len(), 2);
        let sell = &report.trades[1];
        assert_approx(sell.return_rate, (106.0 - 101.0) / 101.0 * 100.0, 1e-9);
        assert_approx(report.final_value, 100_000.0 / 101.0 * 106.0, 1e-6);
    }

    #[test]
    fn final_bar_signal_is_never_executed() {
        // A buy sitting on the last bar is the next-day recommendation.
        let bars = vec![bar(1, 100.0, 100.0), bar(2, 100.0, 100.0), bar(3, 100.0, 100.0)];
        let f = frame(bars, &[(2, Signal::Buy)]);
        let report = run_backtest(&f, 100_000.0).unwrap();
        assert!(report.trades.is_empty());
        assert_eq!(report.final_value, 100_000.0);
    }

    #[test]
    fn buy_without_cash_and_sell_while_flat_are_ignored() {
        let bars = vec![
            bar(1, 100.0, 100.0),
            bar(2, 100.0, 100.0), // sell while flat: ignored
            bar(3, 100.0, 100.0), // buy: executes
            bar(4, 100.0, 100.0), // second buy with no cash: ignored
            bar(5, 100.0, 100.0),
            bar(6, 100.0, 100.0), // dropped
        ];
        let f = frame(
            bars,
            &[(1, Signal::Sell), (2, Signal::Buy), (3, Signal::Buy)],
        );
        let report = run_backtest(&f, 100_000.0).unwrap();
        assert_eq!(report.trades.len(), 1);
        assert_eq!(report.trades[0].action, TradeAction::Buy);
    }

    #[test]
    fn open_position_is_marked_at_last_retained_close() {
        let bars = vec![
            bar(1, 100.0, 100.0),
            bar(2, 100.0, 110.0), // buy at open 100
            bar(3, 110.0, 120.0), // last retained: close 120
            bar(4, 120.0, 121.0), // dropped
        ];
        let f = frame(bars, &[(1, Signal::Buy)]);
        let report = run_backtest(&f, 100_000.0).unwrap();
        // 1000 shares at close 120.
        assert_approx(report.final_value, 120_000.0, 1e-9);
        assert_approx(report.total_return_pct, 20.0, 1e-9);
    }

    #[test]
    fn max_drawdown_against_initial_capital() {
        // All-in at 100, close dips to 80 once: exactly -20%.
        let bars = vec![
            bar(1, 100.0, 100.0),
            bar(2, 100.0, 100.0), // buy
            bar(3, 95.0, 80.0),   // equity 80_000
            bar(4, 85.0, 100.0),  // recovered
            bar(5, 100.0, 100.0), // dropped
        ];
        let f = frame(bars, &[(1, Signal::Buy)]);
        let report = run_backtest(&f, 100_000.0).unwrap();
        assert_eq!(report.stats.max_drawdown, -20.0);
    }

    #[test]
    fn drawdown_ignores_dips_above_initial_capital() {
        // Equity runs up to 150% then falls back to 120%: never below the
        // initial baseline, so drawdown stays 0.
        let bars = vec![
            bar(1, 100.0, 100.0),
            bar(2, 100.0, 150.0), // buy, equity 150_000
            bar(3, 150.0, 120.0), // equity 120_000
            bar(4, 120.0, 120.0), // dropped
        ];
        let f = frame(bars, &[(1, Signal::Buy)]);
        let report = run_backtest(&f, 100_000.0).unwrap();
        assert_eq!(report.stats.max_drawdown, 0.0);
    }

    #[test]
    fn simulator_is_idempotent() {
        let bars = vec![
            bar(1, 100.0, 101.0),
            bar(2, 101.0, 103.0),
            bar(3, 103.0, 102.0),
            bar(4, 102.0, 108.0),
            bar(5, 108.0, 107.0),
            bar(6, 107.0, 107.0),
        ];
        let f = frame(bars, &[(2, Signal::Buy), (4, Signal::Sell)]);
        let first = run_backtest(&f, 50_000.0).unwrap();
        let second = run_backtest(&f, 50_000.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn annualized_return_over_one_year_equals_total_return() {
        let mut b1 = bar(1, 100.0, 100.0);
        let mut b2 = bar(1, 100.0, 110.0);
        let mut b3 = bar(1, 110.0, 110.0);
        b1.trade_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        b2.trade_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(); // 365 days later
        b3.trade_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let f = frame(vec![b1, b2, b3], &[(0, Signal::Buy)]);
        let report = run_backtest(&f, 100_000.0).unwrap();
        assert_approx(report.total_return_pct, 10.0, 1e-9);
        assert_approx(report.annual_return, 0.10, 1e-9);
    }

    #[test]
    fn zero_elapsed_days_is_not_annualizable() {
        // Two bars, the second dropped: a single retained bar spans 0 days.
        let bars = vec![bar(1, 100.0, 100.0), bar(2, 100.0, 100.0)];
        let f = frame(bars, &[]);
        let report = run_backtest(&f, 100_000.0).unwrap();
        assert!(report.annual_return.is_nan());
    }

    #[test]
    fn too_short_frame_is_an_error() {
        let f = frame(vec![bar(1, 100.0, 100.0)], &[]);
        let err = run_backtest(&f, 100_000.0).unwrap_err();
        assert!(matches!(err, BacktestError::InsufficientBars(1)));
    }

    #[test]
    fn non_positive_cash_is_an_error() {
        let bars = vec![bar(1, 100.0, 100.0), bar(2, 100.0, 100.0)];
        let f = frame(bars, &[]);
        assert!(matches!(
            run_backtest(&f, 0.0).unwrap_err(),
            BacktestError::NonPositiveCash(_)
        ));
    }
}
