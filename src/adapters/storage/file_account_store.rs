//! File-based Account Store Adapter
//!
//! Stores the account list as a JSON array in `<data_dir>/tt_accounts.json`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::account::Account;
use crate::ports::{AccountStore, AccountStoreError, ACCOUNTS_STORAGE_KEY};

/// File-based storage for the account list
#[derive(Debug, Clone)]
pub struct FileAccountStore {
    base_path: PathBuf,
}

impl FileAccountStore {
    /// Create a new file store rooted at a data directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileAccountStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the accounts file
    pub fn file_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", ACCOUNTS_STORAGE_KEY))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", ACCOUNTS_STORAGE_KEY))
    }
}

#[async_trait]
impl AccountStore for FileAccountStore {
    async fn load(&self) -> Result<Vec<Account>, AccountStoreError> {
        let json = match fs::read_to_string(self.file_path()).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AccountStoreError::IoError(e.to_string())),
        };

        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&json).map_err(|e| AccountStoreError::Corrupt(e.to_string()))
    }

    async fn save(&self, accounts: &[Account]) -> Result<(), AccountStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| AccountStoreError::IoError(e.to_string()))?;

        let json = serde_json::to_string_pretty(accounts)
            .map_err(|e| AccountStoreError::SerializationFailed(e.to_string()))?;

        // Write beside the target, then swap it in
        let temp = self.temp_path();
        fs::write(&temp, json)
            .await
            .map_err(|e| AccountStoreError::IoError(e.to_string()))?;
        fs::rename(&temp, self.file_path())
            .await
            .map_err(|e| AccountStoreError::IoError(e.to_string()))?;

        Ok(())
    }
}
