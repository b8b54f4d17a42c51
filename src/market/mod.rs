//! Market data collaborator
//!
//! The ledger core only sees the [`PriceSource`] trait; the live Yahoo
//! Finance implementation is glue behind it. Quotes are always resolved at
//! call time and never cached, so two identical calls may legitimately
//! return different numbers.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

pub mod yahoo;

#[cfg(test)]
pub mod fixed;

pub use yahoo::YahooFinanceSource;

/// Tickers shown by the `prices` command when none are given
pub const DEFAULT_WATCHLIST: [&str; 5] = ["GOOGL", "AAPL", "AMZN", "BCOV", "LMT"];

/// Price lookup failure
///
/// Transport, decoding, and missing-data failures all collapse into one
/// kind; the caller's only recourse is the same for each.
#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("No price available for {ticker}: {reason}")]
    Unavailable { ticker: String, reason: String },
}

impl PriceError {
    pub fn unavailable(ticker: &str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            ticker: ticker.to_string(),
            reason: reason.into(),
        }
    }
}

/// One day of OHLC data
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

/// History window for daily candles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRange {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl HistoryRange {
    /// Wire value understood by the chart endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
        }
    }
}

impl FromStr for HistoryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1mo" => Ok(HistoryRange::OneMonth),
            "3mo" => Ok(HistoryRange::ThreeMonths),
            "6mo" => Ok(HistoryRange::SixMonths),
            "1y" => Ok(HistoryRange::OneYear),
            other => Err(format!(
                "Unknown range '{}' (expected 1mo, 3mo, 6mo, or 1y)",
                other
            )),
        }
    }
}

/// Source of market prices
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Latest known trade price for a ticker
    async fn current_price(&self, ticker: &str) -> Result<Decimal, PriceError>;

    /// Daily candles over the given range, oldest first
    async fn daily_history(
        &self,
        ticker: &str,
        range: HistoryRange,
    ) -> Result<Vec<Candle>, PriceError>;
}

/// Trailing moving average of closing prices
///
/// Entries before a full window are None, matching how charting tools
/// leave the first window-1 rows blank.
pub fn moving_average(candles: &[Candle], window: usize) -> Vec<Option<Decimal>> {
    if window == 0 {
        return vec![None; candles.len()];
    }
    candles
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                None
            } else {
                let sum: Decimal = candles[i + 1 - window..=i].iter().map(|c| c.close).sum();
                Some(sum / Decimal::from(window as u64))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn candle(day: u32, close: Decimal) -> Candle {
        Candle {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn test_history_range_round_trip() {
        for s in ["1mo", "3mo", "6mo", "1y"] {
            assert_eq!(HistoryRange::from_str(s).unwrap().as_str(), s);
        }
        assert!(HistoryRange::from_str("2w").is_err());
    }

    #[test]
    fn test_moving_average() {
        let candles = vec![
            candle(1, dec!(10)),
            candle(2, dec!(20)),
            candle(3, dec!(30)),
            candle(4, dec!(40)),
        ];

        let ma = moving_average(&candles, 2);
        assert_eq!(ma, vec![None, Some(dec!(15)), Some(dec!(25)), Some(dec!(35))]);
    }

    #[test]
    fn test_moving_average_short_series() {
        let candles = vec![candle(1, dec!(10))];
        assert_eq!(moving_average(&candles, 10), vec![None]);
        assert_eq!(moving_average(&candles, 0), vec![None]);
    }
}
