//! AccountBook - the in-memory owner of the stored account list.
//!
//! Every mutation is written through to the `AccountStore`. Storage failures
//! are logged and the book keeps working from memory; a corrupt blob loads
//! as an empty list.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::domain::account::{Account, BearerToken, CreatorInfo};
use crate::domain::foundation::{AccountId, Timestamp};
use crate::ports::AccountStore;

/// Account book shared between concurrent publish flows.
pub type SharedAccountBook = Arc<RwLock<AccountBook>>;

/// Errors editing the account book.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountBookError {
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    #[error("Token for account {0} changed while it was being verified")]
    TokenChanged(AccountId),
}

/// Ordered list of accounts backed by an `AccountStore`.
pub struct AccountBook {
    accounts: Vec<Account>,
    store: Arc<dyn AccountStore>,
}

impl std::fmt::Debug for AccountBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountBook")
            .field("accounts", &self.accounts)
            .finish_non_exhaustive()
    }
}

impl AccountBook {
    /// Loads the stored accounts. Never fails: unreadable or corrupt data
    /// yields an empty book.
    pub async fn load(store: Arc<dyn AccountStore>) -> Self {
        let accounts = match store.load().await {
            Ok(accounts) => {
                tracing::debug!(count = accounts.len(), "Loaded accounts");
                accounts
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not load stored accounts, starting empty");
                Vec::new()
            }
        };

        Self { accounts, store }
    }

    pub fn into_shared(self) -> SharedAccountBook {
        Arc::new(RwLock::new(self))
    }

    /// Writes the current list to the store, logging any failure.
    pub async fn save(&self) {
        if let Err(e) = self.store.save(&self.accounts).await {
            tracing::error!(error = %e, "Failed to persist accounts; changes kept in memory");
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// The account new jobs default to.
    pub fn first(&self) -> Option<&Account> {
        self.accounts.first()
    }

    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id() == id)
    }

    fn get_mut(&mut self, id: &AccountId) -> Result<&mut Account, AccountBookError> {
        self.accounts
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or_else(|| AccountBookError::NotFound(id.clone()))
    }

    /// Appends a new unverified account and persists the list.
    pub async fn add(&mut self, label: impl Into<String>, token: impl Into<BearerToken>) -> AccountId {
        let account = Account::new(label, token);
        let id = account.id().clone();
        self.accounts.push(account);
        tracing::info!(account_id = %id, "Account added");
        self.save().await;
        id
    }

    pub async fn set_label(
        &mut self,
        id: &AccountId,
        label: impl Into<String>,
    ) -> Result<(), AccountBookError> {
        self.get_mut(id)?.set_label(label);
        self.save().await;
        Ok(())
    }

    /// Replaces the token; a different token clears the verification.
    pub async fn set_token(
        &mut self,
        id: &AccountId,
        token: impl Into<BearerToken>,
    ) -> Result<(), AccountBookError> {
        let account = self.get_mut(id)?;
        account.set_token(token);
        if !account.is_verified() {
            tracing::debug!(account_id = %id, "Token set; account needs verification");
        }
        self.save().await;
        Ok(())
    }

    pub async fn remove(&mut self, id: &AccountId) -> Result<Account, AccountBookError> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.id() == id)
            .ok_or_else(|| AccountBookError::NotFound(id.clone()))?;
        let removed = self.accounts.remove(index);
        tracing::info!(account_id = %id, "Account removed");
        self.save().await;
        Ok(removed)
    }

    /// Records a successful verification made with `token_used`.
    ///
    /// The result is discarded with `TokenChanged` if the account's token is
    /// no longer `token_used`.
    pub async fn record_verification(
        &mut self,
        id: &AccountId,
        token_used: &BearerToken,
        info: CreatorInfo,
    ) -> Result<Account, AccountBookError> {
        let account = self.get_mut(id)?;
        if !account.token().same_as(token_used) {
            return Err(AccountBookError::TokenChanged(id.clone()));
        }
        account.record_verification(info, Timestamp::now());
        let snapshot = account.clone();
        self.save().await;
        Ok(snapshot)
    }
}
