//! CreatorVerifier - checks a bearer token against TikTok's creator info
//! endpoint and records the result on the account.

use std::sync::Arc;
use thiserror::Error;

use crate::application::account_book::{AccountBookError, SharedAccountBook};
use crate::domain::account::{Account, BearerToken, CreatorInfo};
use crate::domain::foundation::AccountId;
use crate::domain::publish::PublishError;
use crate::ports::{ApiError, ContentPostingApi};

/// Errors verifying a creator token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("Missing token")]
    MissingToken,

    /// TikTok rejected the token; message is verbatim.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Transport(String),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Token for account {0} changed while it was being verified")]
    TokenChanged(AccountId),
}

impl From<ApiError> for VerificationError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::MissingInput(_) => VerificationError::MissingToken,
            ApiError::Upstream { message } => VerificationError::Upstream(message),
            ApiError::Transport(message) => VerificationError::Transport(message),
        }
    }
}

impl From<AccountBookError> for VerificationError {
    fn from(err: AccountBookError) -> Self {
        match err {
            AccountBookError::NotFound(id) => VerificationError::AccountNotFound(id),
            AccountBookError::TokenChanged(id) => VerificationError::TokenChanged(id),
        }
    }
}

impl From<VerificationError> for PublishError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::MissingToken => PublishError::Config(err.to_string()),
            VerificationError::Upstream(message) => PublishError::Upstream(message),
            VerificationError::Transport(message) => PublishError::Transport(message),
            VerificationError::AccountNotFound(id) => PublishError::AccountNotFound(id),
            VerificationError::TokenChanged(_) => PublishError::Config(err.to_string()),
        }
    }
}

/// Verifies creator tokens.
pub struct CreatorVerifier {
    api: Arc<dyn ContentPostingApi>,
}

impl CreatorVerifier {
    pub fn new(api: Arc<dyn ContentPostingApi>) -> Self {
        Self { api }
    }

    /// Queries creator info for `token`. No side effects.
    pub async fn verify(&self, token: &BearerToken) -> Result<CreatorInfo, VerificationError> {
        if token.is_empty() {
            return Err(VerificationError::MissingToken);
        }
        let info = self.api.query_creator_info(token).await?;
        Ok(info)
    }

    /// Verifies the account's current token and stores the snapshot on it.
    ///
    /// The book lock is not held during the network call; if the token is
    /// edited meanwhile the result is discarded.
    pub async fn verify_account(
        &self,
        book: &SharedAccountBook,
        id: &AccountId,
    ) -> Result<Account, VerificationError> {
        let token = {
            let book = book.read().await;
            book.get(id)
                .map(|a| a.token().clone())
                .ok_or_else(|| VerificationError::AccountNotFound(id.clone()))?
        };

        let info = match self.verify(&token).await {
            Ok(info) => info,
            Err(e) => {
                tracing::warn!(account_id = %id, error = %e, "Verification failed");
                return Err(e);
            }
        };

        let account = book
            .write()
            .await
            .record_verification(id, &token, info)
            .await?;
        tracing::info!(
            account_id = %id,
            creator = %account.display_name(),
            "Account verified"
        );
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryAccountStore;
    use crate::adapters::tiktok::MockTikTokApi;
    use crate::application::account_book::AccountBook;
    use std::time::Duration;

    async fn shared_book() -> SharedAccountBook {
        AccountBook::load(Arc::new(InMemoryAccountStore::new()))
            .await
            .into_shared()
    }

    #[tokio::test]
    async fn verify_returns_creator_info() {
        let verifier = CreatorVerifier::new(Arc::new(MockTikTokApi::new()));
        let info = verifier.verify(&BearerToken::new("act.1")).await.unwrap();
        assert_eq!(info.creator_username, "mock_creator");
    }

    #[tokio::test]
    async fn verify_surfaces_upstream_message() {
        let api = MockTikTokApi::new().with_creator_info(Err(ApiError::upstream(
            "The access token is invalid or not found in the request.",
        )));
        let verifier = CreatorVerifier::new(Arc::new(api));

        let err = verifier.verify(&BearerToken::new("act.bad")).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "The access token is invalid or not found in the request."
        );
    }

    #[tokio::test]
    async fn verify_empty_token_makes_no_call() {
        let api = MockTikTokApi::new();
        let verifier = CreatorVerifier::new(Arc::new(api.clone()));

        let err = verifier.verify(&BearerToken::default()).await.unwrap_err();

        assert_eq!(err, VerificationError::MissingToken);
        assert_eq!(api.creator_info_count(), 0);
    }

    #[tokio::test]
    async fn verify_account_records_snapshot() {
        let book = shared_book().await;
        let id = book.write().await.add("Main", "act.1").await;
        let verifier = CreatorVerifier::new(Arc::new(MockTikTokApi::new()));

        let account = verifier.verify_account(&book, &id).await.unwrap();

        assert!(account.is_verified());
        assert!(book.read().await.get(&id).unwrap().fetched_at().is_some());
    }

    #[tokio::test]
    async fn reverify_replaces_snapshot_wholesale() {
        let book = shared_book().await;
        let id = book.write().await.add("Main", "act.1").await;
        let mut second = MockTikTokApi::creator_info_fixture();
        second.creator_username = "renamed".to_string();
        second.privacy_level_options = vec!["SELF_ONLY".to_string()];
        let api = MockTikTokApi::new()
            .with_creator_info(Ok(MockTikTokApi::creator_info_fixture()))
            .with_creator_info(Ok(second.clone()));
        let verifier = CreatorVerifier::new(Arc::new(api));

        let first = verifier.verify_account(&book, &id).await.unwrap();
        let again = verifier.verify_account(&book, &id).await.unwrap();

        assert_eq!(again.creator_info(), Some(&second));
        assert!(again.fetched_at().unwrap() >= first.fetched_at().unwrap());
    }

    #[tokio::test]
    async fn verify_unknown_account_fails() {
        let book = shared_book().await;
        let verifier = CreatorVerifier::new(Arc::new(MockTikTokApi::new()));
        let id = AccountId::new("nope0000").unwrap();

        let err = verifier.verify_account(&book, &id).await.unwrap_err();

        assert_eq!(err, VerificationError::AccountNotFound(id));
    }

    #[tokio::test(start_paused = true)]
    async fn token_edit_during_verification_discards_result() {
        let book = shared_book().await;
        let id = book.write().await.add("Main", "act.old").await;
        let api = MockTikTokApi::new().with_delay(Duration::from_secs(1));
        let verifier = CreatorVerifier::new(Arc::new(api));

        let edit = async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            book.write().await.set_token(&id, "act.new").await.unwrap();
        };
        let (result, ()) = tokio::join!(verifier.verify_account(&book, &id), edit);

        assert_eq!(result.unwrap_err(), VerificationError::TokenChanged(id.clone()));
        let book = book.read().await;
        let account = book.get(&id).unwrap();
        assert_eq!(account.token().expose(), "act.new");
        assert!(!account.is_verified());
    }

    #[test]
    fn missing_token_maps_to_config_publish_error() {
        let err: PublishError = VerificationError::MissingToken.into();
        assert_eq!(err, PublishError::Config("Missing token".to_string()));
    }

    #[test]
    fn token_change_maps_to_config_publish_error() {
        let id = AccountId::new("abc12345").unwrap();
        let err: PublishError = VerificationError::TokenChanged(id).into();
        assert_eq!(
            err,
            PublishError::Config(
                "Token for account abc12345 changed while it was being verified".to_string()
            )
        );
    }
}
