//! Portfolio command for displaying holdings and returns

use anyhow::Result;
use clap::Args;

use crate::cli::commands::prompt_password;
use crate::data_paths::DataPaths;
use crate::ledger::AccountStore;
use crate::market::YahooFinanceSource;
use crate::report::display::print_portfolio;
use crate::report::portfolio_view;

#[derive(Args, Clone)]
pub struct PortfolioArgs {
    /// Account email
    #[arg(long)]
    pub email: String,
}

pub struct PortfolioCommand {
    args: PortfolioArgs,
}

impl PortfolioCommand {
    pub fn new(args: PortfolioArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let store = AccountStore::new(&data_paths);
        let book = store.load().await?;

        let password = prompt_password("Enter your password: ")?;
        let account = store.authenticate(&book, &self.args.email, &password)?;

        let prices = YahooFinanceSource::new();
        let view = portfolio_view(account, &prices).await;

        print_portfolio(&view);
        Ok(())
    }
}
