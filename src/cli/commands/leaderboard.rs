//! Leaderboard command ranking all accounts by net worth

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::data_paths::DataPaths;
use crate::ledger::AccountStore;
use crate::market::YahooFinanceSource;
use crate::report::display::leaderboard_table;
use crate::report::rank;

#[derive(Args, Clone)]
pub struct LeaderboardArgs {}

pub struct LeaderboardCommand {
    _args: LeaderboardArgs,
}

impl LeaderboardCommand {
    pub fn new(args: LeaderboardArgs) -> Self {
        Self { _args: args }
    }

    pub async fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let store = AccountStore::new(&data_paths);
        let book = store.load().await?;

        println!("\n{}", "Leaderboard".bright_blue().bold());
        if book.is_empty() {
            println!("{}", "No accounts yet".bright_black().italic());
            return Ok(());
        }

        let prices = YahooFinanceSource::new();
        let rows = rank(&book, &prices).await;
        println!("{}", leaderboard_table(&rows));
        Ok(())
    }
}
