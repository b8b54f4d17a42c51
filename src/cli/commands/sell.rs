use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::cli::commands::prompt_password;
use crate::data_paths::DataPaths;
use crate::ledger::AccountStore;
use crate::market::YahooFinanceSource;
use crate::report::display::print_receipt;
use crate::trading::TradingEngine;

#[derive(Args, Clone)]
pub struct SellArgs {
    /// Ticker symbol (e.g. AAPL)
    pub ticker: String,

    /// Number of shares to sell
    pub quantity: u32,

    /// Account email
    #[arg(long)]
    pub email: String,
}

pub struct SellCommand {
    args: SellArgs,
}

impl SellCommand {
    pub fn new(args: SellArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let store = AccountStore::new(&data_paths);
        let mut book = store.load().await?;

        let password = prompt_password("Enter your password: ")?;
        store.authenticate(&book, &self.args.email, &password)?;

        info!(ticker = %self.args.ticker, quantity = self.args.quantity, "Placing sell");

        let prices = YahooFinanceSource::new();
        let engine = TradingEngine::new(&store);
        let receipt = engine
            .sell(
                &mut book,
                &self.args.email,
                &self.args.ticker,
                self.args.quantity,
                &prices,
            )
            .await?;

        print_receipt(&receipt);
        Ok(())
    }
}
