//! Prices command for quoting a set of tickers

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use tracing::warn;

use crate::data_paths::DataPaths;
use crate::market::{PriceSource, YahooFinanceSource, DEFAULT_WATCHLIST};
use crate::report::display::prices_table;

#[derive(Args, Clone)]
pub struct PricesArgs {
    /// Tickers to quote (defaults to the built-in watchlist)
    pub tickers: Vec<String>,
}

pub struct PricesCommand {
    args: PricesArgs,
}

impl PricesCommand {
    pub fn new(args: PricesArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, _data_paths: DataPaths) -> Result<()> {
        let tickers: Vec<String> = if self.args.tickers.is_empty() {
            DEFAULT_WATCHLIST.iter().map(|t| t.to_string()).collect()
        } else {
            self.args
                .tickers
                .iter()
                .map(|t| t.trim().to_uppercase())
                .collect()
        };

        let source = YahooFinanceSource::new();
        let mut rows: Vec<(String, Decimal)> = Vec::with_capacity(tickers.len());
        for ticker in &tickers {
            match source.current_price(ticker).await {
                Ok(price) => rows.push((ticker.clone(), price)),
                Err(e) => warn!(%ticker, error = %e, "Skipping ticker"),
            }
        }

        println!("\n{}", "Stock Prices".bright_blue().bold());
        if rows.is_empty() {
            println!("{}", "No prices available".bright_black().italic());
        } else {
            println!("{}", prices_table(&rows));
        }
        Ok(())
    }
}
