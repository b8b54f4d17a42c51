//! Table rendering for reports
//!
//! The core produces structured rows; everything here is presentation.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use crate::ledger::{TradeKind, Transaction};
use crate::market::Candle;
use crate::report::leaderboard::LeaderboardRow;
use crate::report::valuation::PortfolioView;
use crate::trading::TradeReceipt;

/// Render the positions table for a portfolio view
pub fn portfolio_table(view: &PortfolioView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Ticker", "Shares", "Current Price", "Total Value"]);

    for position in &view.positions {
        table.add_row(vec![
            position.ticker.clone(),
            position.quantity.to_string(),
            format!("${:.2}", position.price),
            format!("${:.2}", position.value),
        ]);
    }

    table
}

/// Print a full portfolio report: positions, cash, invested, value, ROI
pub fn print_portfolio(view: &PortfolioView) {
    println!("\n{}", "Portfolio".bright_blue().bold());
    if view.positions.is_empty() {
        println!("{}", "No holdings".bright_black().italic());
    } else {
        println!("{}", portfolio_table(view));
    }

    println!("\n{} ${:.2}", "Balance:".bright_green(), view.cash);
    println!("{} ${:.2}", "Total Invested:".bright_cyan(), view.total_invested);
    println!("{} ${:.2}", "Total Value:".bright_cyan(), view.total_value);

    let roi = format!("{:.2}%", view.roi_percent);
    let roi_display = if view.roi_percent >= Decimal::ZERO {
        roi.bright_green().to_string()
    } else {
        roi.bright_red().to_string()
    };
    println!("{} {}", "Return on Investment (ROI):".bright_cyan(), roi_display);
}

/// Render a ticker/price table
pub fn prices_table(rows: &[(String, Decimal)]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Ticker", "Current Price"]);

    for (ticker, price) in rows {
        table.add_row(vec![ticker.clone(), format!("${:.2}", price)]);
    }

    table
}

/// Render the leaderboard table, rows already ranked
pub fn leaderboard_table(rows: &[LeaderboardRow]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Rank", "Email", "Total Portfolio Value"]);

    for (i, row) in rows.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            row.email.clone(),
            format!("${:.2}", row.net_worth),
        ]);
    }

    table
}

/// Render a transaction history table, oldest first
pub fn history_table(history: &[Transaction]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Side", "Ticker", "Shares", "Price", "Amount"]);

    for tx in history {
        let side = match tx.kind {
            TradeKind::Buy => tx.kind.to_string().bright_green().to_string(),
            TradeKind::Sell => tx.kind.to_string().bright_red().to_string(),
        };
        table.add_row(vec![
            tx.executed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            side,
            tx.ticker.clone(),
            tx.quantity.to_string(),
            format!("${:.2}", tx.unit_price),
            format!("${:.2}", tx.gross_amount()),
        ]);
    }

    table
}

/// Render daily candles with an optional moving-average column
pub fn chart_table(candles: &[Candle], ma: &[Option<Decimal>], ma_label: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Open", "High", "Low", "Close", ma_label, "Volume"]);

    for (i, candle) in candles.iter().enumerate() {
        let ma_cell = ma
            .get(i)
            .copied()
            .flatten()
            .map(|v| format!("${:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            candle.date.format("%Y-%m-%d").to_string(),
            format!("${:.2}", candle.open),
            format!("${:.2}", candle.high),
            format!("${:.2}", candle.low),
            format!("${:.2}", candle.close),
            ma_cell,
            candle.volume.to_string(),
        ]);
    }

    table
}

/// Print a one-line confirmation for an executed trade
pub fn print_receipt(receipt: &TradeReceipt) {
    let action = match receipt.kind {
        TradeKind::Buy => format!("Bought {} shares of {}", receipt.quantity, receipt.ticker)
            .bright_green()
            .to_string(),
        TradeKind::Sell => format!("Sold {} shares of {}", receipt.quantity, receipt.ticker)
            .bright_red()
            .to_string(),
    };
    println!(
        "{} @ ${:.2} (${:.2} total), balance ${:.2}",
        action, receipt.unit_price, receipt.gross, receipt.balance_after
    );
}
