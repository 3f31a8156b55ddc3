//! Account Store Port - persistence of the account list.
//!
//! The whole list is stored as one serialized blob under a fixed key and is
//! overwritten on every save.

use async_trait::async_trait;

use crate::domain::account::Account;

/// Key the account list is stored under.
pub const ACCOUNTS_STORAGE_KEY: &str = "tt_accounts";

/// Errors that can occur during account storage operations
#[derive(Debug, thiserror::Error)]
pub enum AccountStoreError {
    #[error("Stored accounts are corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to serialize accounts: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for loading and saving the ordered account list
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Load all accounts in stored order
    ///
    /// # Returns
    /// An empty list when nothing has been stored yet
    ///
    /// # Errors
    /// Returns `AccountStoreError::Corrupt` if the stored blob cannot be decoded
    async fn load(&self) -> Result<Vec<Account>, AccountStoreError>;

    /// Replace the stored list with `accounts`
    ///
    /// # Errors
    /// Returns `AccountStoreError` if the blob cannot be written
    async fn save(&self, accounts: &[Account]) -> Result<(), AccountStoreError>;
}
