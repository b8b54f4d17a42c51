//! CLI Commands module
//!
//! Each command follows a consistent pattern with dedicated Args and
//! Command structs. Commands that act on an account load the book,
//! authenticate, perform the operation, and let the store write through.

use anyhow::Result;

// Command modules
pub mod buy;
pub mod chart;
pub mod history;
pub mod leaderboard;
pub mod portfolio;
pub mod prices;
pub mod register;
pub mod sell;

/// Prompt for a password without echoing it
pub(crate) fn prompt_password(prompt: &str) -> Result<String> {
    Ok(rpassword::prompt_password(prompt)?)
}
