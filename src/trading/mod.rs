//! Trade execution

pub mod engine;

pub use engine::{TradeError, TradeReceipt, TradingEngine};
