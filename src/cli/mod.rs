//! CLI module for papertrade
//!
//! Command-line interface for the trading game. Uses clap for argument
//! parsing and a structured command pattern: every subcommand has a
//! dedicated Args and Command struct.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{self, LogMode, LoggingConfig};

use commands::buy::{BuyArgs, BuyCommand};
use commands::chart::{ChartArgs, ChartCommand};
use commands::history::{HistoryArgs, HistoryCommand};
use commands::leaderboard::{LeaderboardArgs, LeaderboardCommand};
use commands::portfolio::{PortfolioArgs, PortfolioCommand};
use commands::prices::{PricesArgs, PricesCommand};
use commands::register::{RegisterArgs, RegisterCommand};
use commands::sell::{SellArgs, SellCommand};

#[derive(Parser)]
#[command(name = "papertrade")]
#[command(version)]
#[command(about = "Simulated stock trading game with live market prices", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory path (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new account
    Register(RegisterArgs),

    /// Buy shares at the current market price
    Buy(BuyArgs),

    /// Sell shares at the current market price
    Sell(SellArgs),

    /// Show holdings, balance, and return on investment
    Portfolio(PortfolioArgs),

    /// Show transaction history
    History(HistoryArgs),

    /// Show current prices for a set of tickers
    Prices(PricesArgs),

    /// Show recent daily OHLC data for a ticker
    Chart(ChartArgs),

    /// Rank all accounts by total net worth
    Leaderboard(LeaderboardArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        if self.verbose > 0 {
            std::env::set_var("RUST_LOG", "papertrade=debug");
        }

        let data_paths = DataPaths::new(&self.data_dir);
        data_paths.ensure_directories()?;

        logging::init_logging(LoggingConfig::new(LogMode::ConsoleAndFile, data_paths.clone()))?;

        match self.command {
            Commands::Register(args) => RegisterCommand::new(args).execute(data_paths).await,
            Commands::Buy(args) => BuyCommand::new(args).execute(data_paths).await,
            Commands::Sell(args) => SellCommand::new(args).execute(data_paths).await,
            Commands::Portfolio(args) => PortfolioCommand::new(args).execute(data_paths).await,
            Commands::History(args) => HistoryCommand::new(args).execute(data_paths).await,
            Commands::Prices(args) => PricesCommand::new(args).execute(data_paths).await,
            Commands::Chart(args) => ChartCommand::new(args).execute(data_paths).await,
            Commands::Leaderboard(args) => LeaderboardCommand::new(args).execute(data_paths).await,
        }
    }
}
