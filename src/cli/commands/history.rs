//! History command for listing an account's transactions

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::cli::commands::prompt_password;
use crate::data_paths::DataPaths;
use crate::ledger::AccountStore;
use crate::report::display::history_table;

#[derive(Args, Clone)]
pub struct HistoryArgs {
    /// Account email
    #[arg(long)]
    pub email: String,
}

pub struct HistoryCommand {
    args: HistoryArgs,
}

impl HistoryCommand {
    pub fn new(args: HistoryArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let store = AccountStore::new(&data_paths);
        let book = store.load().await?;

        let password = prompt_password("Enter your password: ")?;
        let account = store.authenticate(&book, &self.args.email, &password)?;

        println!("\n{}", "Transaction History".bright_blue().bold());
        if account.history.is_empty() {
            println!("{}", "No transactions yet".bright_black().italic());
        } else {
            println!("{}", history_table(&account.history));
        }
        Ok(())
    }
}
