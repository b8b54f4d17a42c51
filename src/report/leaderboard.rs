//! Net-worth ranking across all accounts

use rust_decimal::Decimal;
use tracing::warn;

use crate::ledger::AccountBook;
use crate::market::PriceSource;

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub email: String,
    pub net_worth: Decimal,
}

/// Rank all accounts by net worth, highest first
///
/// Net worth is cash plus the market value of every holding. A ticker
/// whose price cannot be resolved contributes nothing to that account
/// (logged, not fatal). The sort is stable, so accounts with equal net
/// worth stay in registration order; this keeps rankings deterministic
/// when tests pin prices.
pub async fn rank(book: &AccountBook, prices: &dyn PriceSource) -> Vec<LeaderboardRow> {
    let mut rows = Vec::with_capacity(book.len());

    for account in book.iter() {
        let mut net_worth = account.balance;
        for (ticker, &quantity) in &account.holdings {
            match prices.current_price(ticker).await {
                Ok(price) => net_worth += price * Decimal::from(quantity),
                Err(e) => {
                    warn!(email = %account.email, %ticker, error = %e,
                        "Ticker excluded from net worth");
                }
            }
        }
        rows.push(LeaderboardRow {
            email: account.email.clone(),
            net_worth,
        });
    }

    rows.sort_by(|a, b| b.net_worth.cmp(&a.net_worth));
    rows
}
