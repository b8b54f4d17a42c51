//! Buy/sell execution against one account
//!
//! Every trade is a single in-process transition: validate, resolve the
//! price, mutate, persist. The book on disk reflects the new state before
//! the call returns. Any failure leaves the account exactly as it was.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::ledger::{AccountBook, AccountStore, StoreError, TradeKind, Transaction};
use crate::market::{PriceError, PriceSource};

/// Trade execution errors
#[derive(Debug, thiserror::Error)]
pub enum TradeError {
    #[error("Quantity must be a positive number of shares")]
    InvalidQuantity,

    #[error("Insufficient funds: cost is {needed}, balance is {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    #[error("Not enough shares of {ticker}: tried to sell {requested}, holding {held}")]
    InsufficientShares {
        ticker: String,
        requested: u32,
        held: u32,
    },

    #[error("No position in {0}")]
    UnknownHolding(String),

    #[error(transparent)]
    Price(#[from] PriceError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful trade, for the display layer
#[derive(Debug, Clone)]
pub struct TradeReceipt {
    pub kind: TradeKind,
    pub ticker: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Cash debited (buy) or credited (sell)
    pub gross: Decimal,
    pub balance_after: Decimal,
}

/// Applies buys and sells to accounts, writing through the store
pub struct TradingEngine<'a> {
    store: &'a AccountStore,
}

impl<'a> TradingEngine<'a> {
    pub fn new(store: &'a AccountStore) -> Self {
        Self { store }
    }

    /// Buy shares at the current market price
    ///
    /// The price is looked up on every call, never reused from an earlier
    /// quote, so repeated identical calls can settle at different prices.
    pub async fn buy(
        &self,
        book: &mut AccountBook,
        email: &str,
        ticker: &str,
        quantity: u32,
        prices: &dyn PriceSource,
    ) -> Result<TradeReceipt, TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity);
        }
        let ticker = canonical_ticker(ticker);

        let available = book
            .get(email)
            .ok_or_else(|| StoreError::UnknownIdentity(email.to_string()))?
            .balance;

        let price = prices.current_price(&ticker).await?;
        let cost = price * Decimal::from(quantity);
        if available < cost {
            return Err(TradeError::InsufficientFunds {
                needed: cost,
                available,
            });
        }

        let account = book
            .get_mut(email)
            .ok_or_else(|| StoreError::UnknownIdentity(email.to_string()))?;
        account.balance -= cost;
        *account.holdings.entry(ticker.clone()).or_insert(0) += quantity;
        account.history.push(Transaction {
            kind: TradeKind::Buy,
            ticker: ticker.clone(),
            quantity,
            unit_price: price,
            executed_at: Utc::now(),
        });

        let receipt = TradeReceipt {
            kind: TradeKind::Buy,
            ticker: ticker.clone(),
            quantity,
            unit_price: price,
            gross: cost,
            balance_after: account.balance,
        };

        self.store.save(book).await?;

        info!(email, %ticker, quantity, %price, "Executed buy");
        Ok(receipt)
    }

    /// Sell shares at the current market price
    ///
    /// Holdings are checked before the price lookup, so a short sell
    /// attempt never makes a network call. Selling a position down to
    /// zero removes the ticker from holdings entirely.
    pub async fn sell(
        &self,
        book: &mut AccountBook,
        email: &str,
        ticker: &str,
        quantity: u32,
        prices: &dyn PriceSource,
    ) -> Result<TradeReceipt, TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity);
        }
        let ticker = canonical_ticker(ticker);

        let held = book
            .get(email)
            .ok_or_else(|| StoreError::UnknownIdentity(email.to_string()))?
            .position(&ticker);
        if held == 0 {
            return Err(TradeError::UnknownHolding(ticker));
        }
        if held < quantity {
            return Err(TradeError::InsufficientShares {
                ticker,
                requested: quantity,
                held,
            });
        }

        let price = prices.current_price(&ticker).await?;
        let proceeds = price * Decimal::from(quantity);

        let account = book
            .get_mut(email)
            .ok_or_else(|| StoreError::UnknownIdentity(email.to_string()))?;
        account.balance += proceeds;
        let remaining = held - quantity;
        if remaining == 0 {
            account.holdings.remove(&ticker);
        } else {
            account.holdings.insert(ticker.clone(), remaining);
        }
        account.history.push(Transaction {
            kind: TradeKind::Sell,
            ticker: ticker.clone(),
            quantity,
            unit_price: price,
            executed_at: Utc::now(),
        });

        let receipt = TradeReceipt {
            kind: TradeKind::Sell,
            ticker: ticker.clone(),
            quantity,
            unit_price: price,
            gross: proceeds,
            balance_after: account.balance,
        };

        self.store.save(book).await?;

        info!(email, %ticker, quantity, %price, "Executed sell");
        Ok(receipt)
    }
}

/// Holdings keys are canonical ticker symbols: trimmed, uppercase
fn canonical_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}
