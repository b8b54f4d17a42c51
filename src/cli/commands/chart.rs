//! Chart command for showing recent daily OHLC data

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use crate::data_paths::DataPaths;
use crate::market::{moving_average, HistoryRange, PriceSource, YahooFinanceSource};
use crate::report::display::chart_table;

/// Moving-average window shown alongside the candles
const MA_WINDOW: usize = 10;

/// Most recent rows to print
const MAX_ROWS: usize = 30;

#[derive(Args, Clone)]
pub struct ChartArgs {
    /// Ticker symbol (e.g. AAPL)
    pub ticker: String,

    /// History window: 1mo, 3mo, 6mo, or 1y
    #[arg(long, default_value = "6mo")]
    pub range: HistoryRange,
}

pub struct ChartCommand {
    args: ChartArgs,
}

impl ChartCommand {
    pub fn new(args: ChartArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, _data_paths: DataPaths) -> Result<()> {
        let ticker = self.args.ticker.trim().to_uppercase();
        let source = YahooFinanceSource::new();

        println!("{}", "Getting data...".bright_blue());
        let candles = source.daily_history(&ticker, self.args.range).await?;

        let ma = moving_average(&candles, MA_WINDOW);

        // Show only the tail; the MA is computed over the full series
        let start = candles.len().saturating_sub(MAX_ROWS);
        let table = chart_table(&candles[start..], &ma[start..], "10d MA");

        println!(
            "\n{} ({} daily candles, last {})",
            ticker.bright_blue().bold(),
            self.args.range.as_str(),
            candles.len() - start
        );
        println!("{}", table);
        Ok(())
    }
}
