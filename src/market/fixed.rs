//! Deterministic in-memory price source for tests

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Candle, HistoryRange, PriceError, PriceSource};

/// Fixed price table; counts lookups so tests can assert that failed
/// preconditions never touch the market
#[derive(Default)]
pub struct FixedPriceSource {
    prices: HashMap<String, Decimal>,
    lookups: AtomicUsize,
}

impl FixedPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, ticker: &str, price: Decimal) -> Self {
        self.prices.insert(ticker.to_string(), price);
        self
    }

    pub fn set_price(&mut self, ticker: &str, price: Decimal) {
        self.prices.insert(ticker.to_string(), price);
    }

    /// Number of current_price calls made against this source
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for FixedPriceSource {
    async fn current_price(&self, ticker: &str) -> Result<Decimal, PriceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.prices
            .get(ticker)
            .copied()
            .ok_or_else(|| PriceError::unavailable(ticker, "not in fixed table"))
    }

    async fn daily_history(
        &self,
        ticker: &str,
        _range: HistoryRange,
    ) -> Result<Vec<Candle>, PriceError> {
        Err(PriceError::unavailable(ticker, "fixed source has no history"))
    }
}
