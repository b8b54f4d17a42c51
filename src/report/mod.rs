//! Valuation, ranking, and table rendering

pub mod display;
pub mod leaderboard;
pub mod valuation;

pub use leaderboard::{rank, LeaderboardRow};
pub use valuation::{portfolio_view, PortfolioView, PositionView};
