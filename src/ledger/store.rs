//! Durable storage for the account book
//!
//! The whole collection is persisted as one JSON document and rewritten on
//! every mutation. Writes go to a temporary file first and are renamed into
//! place, so a crash mid-write never leaves a half-written book visible.

use rand::Rng;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

use crate::data_paths::DataPaths;
use crate::ledger::credentials;
use crate::ledger::types::{Account, AccountBook};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Account store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid email address: {0}")]
    InvalidIdentity(String),

    #[error("An account already exists for {0}")]
    DuplicateIdentity(String),

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters long")]
    WeakCredential,

    #[error("No account found for {0}")]
    UnknownIdentity(String),

    #[error("Incorrect password")]
    BadCredential,

    #[error("Account store is corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to hash credential: {0}")]
    Credential(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Account book storage manager
pub struct AccountStore {
    accounts_path: PathBuf,
}

impl AccountStore {
    /// Create a store over the account file in the given data directory
    pub fn new(data_paths: &DataPaths) -> Self {
        Self {
            accounts_path: data_paths.accounts_file(),
        }
    }

    /// Load the account book from disk
    ///
    /// A missing file is an empty book. A file that exists but does not
    /// parse into the account record shape is a corrupt store, and the
    /// caller must not keep operating on it.
    pub async fn load(&self) -> Result<AccountBook, StoreError> {
        if !self.accounts_path.exists() {
            debug!("No account book found, starting empty");
            return Ok(AccountBook::new());
        }

        let content = fs::read_to_string(&self.accounts_path).await?;
        let book: AccountBook =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        info!("Loaded account book with {} accounts", book.len());
        Ok(book)
    }

    /// Save the account book to disk, replacing the previous state
    pub async fn save(&self, book: &AccountBook) -> Result<(), StoreError> {
        if let Some(parent) = self.accounts_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(book)?;

        // Write to a temporary file, then rename into place
        let temp_path = self.accounts_path.with_extension("tmp");
        fs::write(&temp_path, json).await?;
        fs::rename(&temp_path, &self.accounts_path).await?;

        debug!("Saved account book with {} accounts", book.len());
        Ok(())
    }

    /// Register a new account and persist the book
    ///
    /// Assigns a fresh 4-digit user id by rejection sampling against the
    /// ids already in the book, hashes the password, and seeds the account
    /// with the starting cash balance.
    pub async fn register(
        &self,
        book: &mut AccountBook,
        email: &str,
        raw_password: &str,
    ) -> Result<Account, StoreError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(StoreError::InvalidIdentity(email.to_string()));
        }
        if book.contains(email) {
            return Err(StoreError::DuplicateIdentity(email.to_string()));
        }
        if raw_password.len() < MIN_PASSWORD_LEN {
            return Err(StoreError::WeakCredential);
        }

        let user_id = generate_user_id(book);
        let digest = credentials::hash_password(raw_password)
            .map_err(|e| StoreError::Credential(e.to_string()))?;

        let account = Account::new(email.to_string(), user_id, digest);
        book.insert(account.clone());
        self.save(book).await?;

        info!(email = %account.email, user_id = %account.user_id, "Registered new account");
        Ok(account)
    }

    /// Look up an account by email and verify its password
    pub fn authenticate<'a>(
        &self,
        book: &'a AccountBook,
        email: &str,
        raw_password: &str,
    ) -> Result<&'a Account, StoreError> {
        let email = email.trim();
        let account = book
            .get(email)
            .ok_or_else(|| StoreError::UnknownIdentity(email.to_string()))?;

        if !credentials::verify_password(raw_password, &account.credential_digest) {
            return Err(StoreError::BadCredential);
        }

        Ok(account)
    }
}

/// Check the email shape: non-empty local part, one `@`, dotted domain
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, suffix)) => !head.is_empty() && !suffix.is_empty(),
        None => false,
    }
}

/// Draw 4-digit ids until one is free
fn generate_user_id(book: &AccountBook) -> String {
    let mut rng = rand::rng();
    loop {
        let candidate = rng.random_range(1000..=9999).to_string();
        if !book.user_id_taken(&candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{TradeKind, Transaction};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> AccountStore {
        AccountStore::new(&DataPaths::new(dir.path()))
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("player@example.com"));
        assert!(is_valid_email("a.b@mail.example.co"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("player"));
        assert!(!is_valid_email("player@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("player@.com"));
        assert!(!is_valid_email("player@example."));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty_book() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let book = store.load().await.unwrap();
        assert!(book.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_errors() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(dir.path().join("accounts.json"), "{not json").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_load_wrong_shape_errors() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        // Valid JSON, but not the account record shape
        std::fs::write(
            dir.path().join("accounts.json"),
            r#"{"accounts": [{"email": "x@y.z"}]}"#,
        )
        .unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut book = AccountBook::new();
        store
            .register(&mut book, "player@example.com", "hunter22")
            .await
            .unwrap();
        {
            let acct = book.get_mut("player@example.com").unwrap();
            acct.balance = dec!(9500.25);
            acct.holdings.insert("AAPL".to_string(), 5);
            acct.history.push(Transaction {
                kind: TradeKind::Buy,
                ticker: "AAPL".to_string(),
                quantity: 5,
                unit_price: dec!(99.95),
                executed_at: Utc::now(),
            });
        }
        store.save(&book).await.unwrap();

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded, book);
        assert_eq!(
            reloaded.get("player@example.com").unwrap().balance,
            dec!(9500.25)
        );
    }

    #[tokio::test]
    async fn test_register_defaults_and_persistence() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut book = AccountBook::new();
        let account = store
            .register(&mut book, "player@example.com", "hunter22")
            .await
            .unwrap();

        assert_eq!(account.balance, dec!(10000.00));
        assert!(account.holdings.is_empty());
        assert!(account.history.is_empty());
        assert_eq!(account.user_id.len(), 4);
        assert!(account.user_id.chars().all(|c| c.is_ascii_digit()));
        assert_ne!(account.credential_digest, "hunter22");

        // Registration is write-through: a fresh store sees the account
        let reloaded = store.load().await.unwrap();
        assert!(reloaded.contains("player@example.com"));
    }

    #[tokio::test]
    async fn test_register_rejections() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut book = AccountBook::new();

        let err = store
            .register(&mut book, "not-an-email", "hunter22")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidIdentity(_)));

        let err = store
            .register(&mut book, "player@example.com", "short")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::WeakCredential));

        store
            .register(&mut book, "player@example.com", "hunter22")
            .await
            .unwrap();
        let err = store
            .register(&mut book, "player@example.com", "hunter22")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateIdentity(_)));

        assert_eq!(book.len(), 1);
    }

    #[tokio::test]
    async fn test_user_ids_unique() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut book = AccountBook::new();

        for i in 0..20 {
            store
                .register(&mut book, &format!("p{}@example.com", i), "hunter22")
                .await
                .unwrap();
        }

        let mut ids: Vec<String> = book.iter().map(|a| a.user_id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut book = AccountBook::new();
        store
            .register(&mut book, "player@example.com", "hunter22")
            .await
            .unwrap();

        let account = store
            .authenticate(&book, "player@example.com", "hunter22")
            .unwrap();
        assert_eq!(account.email, "player@example.com");

        let err = store
            .authenticate(&book, "player@example.com", "wrong-pass")
            .unwrap_err();
        assert!(matches!(err, StoreError::BadCredential));

        let err = store
            .authenticate(&book, "nobody@example.com", "hunter22")
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownIdentity(_)));
    }
}
