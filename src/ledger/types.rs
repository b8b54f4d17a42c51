//! Account and transaction type definitions

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cash every account starts with, in dollars
pub const STARTING_BALANCE: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeKind {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeKind::Buy => write!(f, "BUY"),
            TradeKind::Sell => write!(f, "SELL"),
        }
    }
}

/// A single executed trade, recorded at execution time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TradeKind,
    pub ticker: String,
    pub quantity: u32,
    /// Price per share at execution
    pub unit_price: Decimal,
    pub executed_at: DateTime<Utc>,
}

impl Transaction {
    /// Total cash moved by this trade
    pub fn gross_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A player account
///
/// `holdings` only carries tickers with a positive share count; a position
/// sold down to zero is removed, never stored as zero. `history` is
/// append-only and chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Identity key, immutable once created
    pub email: String,
    /// Short numeric id, unique across the book, immutable
    pub user_id: String,
    /// Argon2 digest of the password, never the password itself
    pub credential_digest: String,
    pub balance: Decimal,
    #[serde(default)]
    pub holdings: BTreeMap<String, u32>,
    #[serde(default)]
    pub history: Vec<Transaction>,
}

impl Account {
    pub fn new(email: String, user_id: String, credential_digest: String) -> Self {
        Self {
            email,
            user_id,
            credential_digest,
            balance: STARTING_BALANCE,
            holdings: BTreeMap::new(),
            history: Vec::new(),
        }
    }

    /// Shares currently held for a ticker (0 when not held)
    pub fn position(&self, ticker: &str) -> u32 {
        self.holdings.get(ticker).copied().unwrap_or(0)
    }
}

/// The full account collection, ordered by registration
///
/// Iteration order is registration order, which is also the documented
/// leaderboard tie-break for equal net worth. Emails are unique keys;
/// user ids are unique across the book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountBook {
    accounts: Vec<Account>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn get(&self, email: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.email == email)
    }

    pub fn get_mut(&mut self, email: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|a| a.email == email)
    }

    pub fn contains(&self, email: &str) -> bool {
        self.get(email).is_some()
    }

    pub fn user_id_taken(&self, user_id: &str) -> bool {
        self.accounts.iter().any(|a| a.user_id == user_id)
    }

    /// Append an account. The caller is responsible for having checked
    /// email and user id uniqueness first.
    pub fn insert(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Accounts in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }
}
