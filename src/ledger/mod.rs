//! Account book, persistence, and registration/authentication

pub mod credentials;
pub mod store;
pub mod types;

pub use store::{AccountStore, StoreError};
pub use types::{Account, AccountBook, TradeKind, Transaction};
