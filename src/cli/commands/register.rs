//! Register command for creating a new account

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::cli::commands::prompt_password;
use crate::data_paths::DataPaths;
use crate::ledger::store::MIN_PASSWORD_LEN;
use crate::ledger::AccountStore;

#[derive(Args, Clone)]
pub struct RegisterArgs {
    /// Email address for the new account
    pub email: String,
}

pub struct RegisterCommand {
    args: RegisterArgs,
}

impl RegisterCommand {
    pub fn new(args: RegisterArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, data_paths: DataPaths) -> Result<()> {
        let store = AccountStore::new(&data_paths);
        let mut book = store.load().await?;

        let password = prompt_password(&format!(
            "Enter your password (at least {} characters): ",
            MIN_PASSWORD_LEN
        ))?;

        let account = store.register(&mut book, &self.args.email, &password).await?;

        println!(
            "{} Welcome, {} (user id {}). Starting balance: ${:.2}",
            "Account created.".bright_green(),
            account.email,
            account.user_id,
            account.balance
        );
        Ok(())
    }
}
