//! Point-in-time portfolio valuation
//!
//! Walks the full transaction history on every call rather than keeping a
//! running cost-basis ledger. Cost basis is attributed to every ticker
//! still held and is not reduced by sells; a position that was fully
//! exited and bought back therefore counts its older buys again. Known
//! distortion, kept deliberately (see DESIGN.md).

use rust_decimal::Decimal;
use tracing::warn;

use crate::ledger::{Account, TradeKind};
use crate::market::PriceSource;

/// One currently-held ticker, valued at the current market price
#[derive(Debug, Clone, PartialEq)]
pub struct PositionView {
    pub ticker: String,
    pub quantity: u32,
    pub price: Decimal,
    pub value: Decimal,
}

/// Financial summary of one account
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioView {
    /// Valued positions, in stable (alphabetical) ticker order. Tickers
    /// whose price could not be resolved are absent.
    pub positions: Vec<PositionView>,
    pub cash: Decimal,
    pub total_invested: Decimal,
    pub total_value: Decimal,
    pub roi_percent: Decimal,
}

/// Value an account's holdings against current prices
///
/// A ticker whose price lookup fails is dropped from the rows and from
/// `total_value`; a partial report beats no report when market data is
/// flaky. The skip is logged for observability.
pub async fn portfolio_view(account: &Account, prices: &dyn PriceSource) -> PortfolioView {
    let mut positions = Vec::with_capacity(account.holdings.len());
    let mut total_value = Decimal::ZERO;

    for (ticker, &quantity) in &account.holdings {
        let price = match prices.current_price(ticker).await {
            Ok(price) => price,
            Err(e) => {
                warn!(%ticker, error = %e, "Skipping ticker in valuation");
                continue;
            }
        };
        let value = price * Decimal::from(quantity);
        total_value += value;
        positions.push(PositionView {
            ticker: ticker.clone(),
            quantity,
            price,
            value,
        });
    }

    let total_invested = invested_cost(account);
    let roi_percent = if total_invested.is_zero() {
        Decimal::ZERO
    } else {
        (total_value - total_invested) / total_invested * Decimal::from(100)
    };

    PortfolioView {
        positions,
        cash: account.balance,
        total_invested,
        total_value,
        roi_percent,
    }
}

/// Sum of buy cost across the whole history for tickers still held
fn invested_cost(account: &Account) -> Decimal {
    account
        .history
        .iter()
        .filter(|tx| tx.kind == TradeKind::Buy && account.holdings.contains_key(&tx.ticker))
        .map(|tx| tx.gross_amount())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Transaction;
    use crate::market::fixed::FixedPriceSource;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn account() -> Account {
        Account::new(
            "player@example.com".to_string(),
            "1234".to_string(),
            "digest".to_string(),
        )
    }

    fn tx(kind: TradeKind, ticker: &str, quantity: u32, price: Decimal) -> Transaction {
        Transaction {
            kind,
            ticker: ticker.to_string(),
            quantity,
            unit_price: price,
            executed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_empty_portfolio_has_zero_roi() {
        let acct = account();
        let prices = FixedPriceSource::new();

        let view = portfolio_view(&acct, &prices).await;
        assert!(view.positions.is_empty());
        assert_eq!(view.total_invested, Decimal::ZERO);
        assert_eq!(view.total_value, Decimal::ZERO);
        assert_eq!(view.roi_percent, Decimal::ZERO);
        assert_eq!(view.cash, dec!(10000.00));
    }

    #[tokio::test]
    async fn test_valuation_and_roi() {
        let mut acct = account();
        acct.holdings.insert("XYZ".to_string(), 10);
        acct.history.push(tx(TradeKind::Buy, "XYZ", 10, dec!(100.00)));

        let prices = FixedPriceSource::new().with_price("XYZ", dec!(110.00));
        let view = portfolio_view(&acct, &prices).await;

        assert_eq!(
            view.positions,
            vec![PositionView {
                ticker: "XYZ".to_string(),
                quantity: 10,
                price: dec!(110.00),
                value: dec!(1100.00),
            }]
        );
        assert_eq!(view.total_invested, dec!(1000.00));
        assert_eq!(view.total_value, dec!(1100.00));
        assert_eq!(view.roi_percent, dec!(10));
    }

    #[tokio::test]
    async fn test_exited_ticker_drops_out_of_invested() {
        let mut acct = account();
        acct.holdings.insert("AAA".to_string(), 5);
        acct.history.push(tx(TradeKind::Buy, "AAA", 5, dec!(10.00)));
        acct.history.push(tx(TradeKind::Buy, "GONE", 3, dec!(200.00)));
        acct.history.push(tx(TradeKind::Sell, "GONE", 3, dec!(250.00)));

        let prices = FixedPriceSource::new().with_price("AAA", dec!(12.00));
        let view = portfolio_view(&acct, &prices).await;

        // GONE was fully exited: its buys no longer count as invested
        assert_eq!(view.total_invested, dec!(50.00));
        assert_eq!(view.total_value, dec!(60.00));
    }

    #[tokio::test]
    async fn test_rebuy_counts_older_buys_again() {
        let mut acct = account();
        acct.holdings.insert("XYZ".to_string(), 10);
        acct.history.push(tx(TradeKind::Buy, "XYZ", 10, dec!(50.00)));
        acct.history.push(tx(TradeKind::Sell, "XYZ", 10, dec!(55.00)));
        acct.history.push(tx(TradeKind::Buy, "XYZ", 10, dec!(50.00)));

        let prices = FixedPriceSource::new().with_price("XYZ", dec!(50.00));
        let view = portfolio_view(&acct, &prices).await;

        // Full-history replay without basis removal: both buys count
        assert_eq!(view.total_invested, dec!(1000.00));
    }

    #[tokio::test]
    async fn test_unpriceable_ticker_is_skipped_not_fatal() {
        let mut acct = account();
        acct.holdings.insert("GOOD".to_string(), 2);
        acct.holdings.insert("DARK".to_string(), 3);
        acct.history.push(tx(TradeKind::Buy, "GOOD", 2, dec!(10.00)));
        acct.history.push(tx(TradeKind::Buy, "DARK", 3, dec!(20.00)));

        let prices = FixedPriceSource::new().with_price("GOOD", dec!(15.00));
        let view = portfolio_view(&acct, &prices).await;

        assert_eq!(view.positions.len(), 1);
        assert_eq!(view.positions[0].ticker, "GOOD");
        assert_eq!(view.total_value, dec!(30.00));
        // Invested still covers every currently-held ticker
        assert_eq!(view.total_invested, dec!(80.00));
    }

    #[tokio::test]
    async fn test_positions_in_stable_order() {
        let mut acct = account();
        acct.holdings.insert("ZZZ".to_string(), 1);
        acct.holdings.insert("AAA".to_string(), 1);
        acct.holdings.insert("MMM".to_string(), 1);

        let prices = FixedPriceSource::new()
            .with_price("ZZZ", dec!(1))
            .with_price("AAA", dec!(1))
            .with_price("MMM", dec!(1));
        let view = portfolio_view(&acct, &prices).await;

        let tickers: Vec<&str> = view.positions.iter().map(|p| p.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAA", "MMM", "ZZZ"]);
    }
}
