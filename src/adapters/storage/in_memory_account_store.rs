//! In-Memory Account Store Adapter
//!
//! Keeps the serialized account blob in memory, the way a key-value store
//! would. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::Account;
use crate::ports::{AccountStore, AccountStoreError};

/// In-memory storage for the account list
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    blob: Arc<RwLock<Option<String>>>,
    fail_writes: bool,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a raw blob (e.g. corrupt data in tests)
    pub fn with_raw(blob: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(RwLock::new(Some(blob.into()))),
            fail_writes: false,
        }
    }

    /// Make every save fail, simulating an unwritable store
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// The stored blob, if any
    pub async fn raw(&self) -> Option<String> {
        self.blob.read().await.clone()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn load(&self) -> Result<Vec<Account>, AccountStoreError> {
        match self.blob.read().await.as_deref() {
            None => Ok(Vec::new()),
            Some(json) => {
                serde_json::from_str(json).map_err(|e| AccountStoreError::Corrupt(e.to_string()))
            }
        }
    }

    async fn save(&self, accounts: &[Account]) -> Result<(), AccountStoreError> {
        if self.fail_writes {
            return Err(AccountStoreError::IoError("storage quota exceeded".to_string()));
        }
        let json = serde_json::to_string(accounts)
            .map_err(|e| AccountStoreError::SerializationFailed(e.to_string()))?;
        *self.blob.write().await = Some(json);
        Ok(())
    }
}
