//! ExchangeTokenHandler - turns an OAuth authorization code into a bearer
//! token and optionally stores it as a new account.

use std::sync::Arc;

use crate::application::account_book::SharedAccountBook;
use crate::domain::foundation::AccountId;
use crate::ports::{ApiError, OAuthTokenExchange, TokenExchangeRequest, TokenGrant};

/// Command to exchange an authorization code.
#[derive(Debug, Clone)]
pub struct ExchangeTokenCommand {
    pub request: TokenExchangeRequest,
    /// Label for a new account holding the token; `None` stores nothing.
    pub store_as: Option<String>,
}

/// Result of a successful exchange.
#[derive(Debug, Clone)]
pub struct ExchangeTokenResult {
    pub grant: TokenGrant,
    pub account_id: Option<AccountId>,
}

/// Handler for the authorization-code grant.
pub struct ExchangeTokenHandler {
    oauth: Arc<dyn OAuthTokenExchange>,
    accounts: SharedAccountBook,
}

impl ExchangeTokenHandler {
    pub fn new(oauth: Arc<dyn OAuthTokenExchange>, accounts: SharedAccountBook) -> Self {
        Self { oauth, accounts }
    }

    pub async fn handle(&self, cmd: ExchangeTokenCommand) -> Result<ExchangeTokenResult, ApiError> {
        let grant = self.oauth.exchange_code(&cmd.request).await?;
        tracing::info!(open_id = %grant.open_id, scope = %grant.scope, "Authorization code exchanged");

        let account_id = match cmd.store_as {
            Some(label) => Some(
                self.accounts
                    .write()
                    .await
                    .add(label, grant.access_token.clone())
                    .await,
            ),
            None => None,
        };

        Ok(ExchangeTokenResult { grant, account_id })
    }
}
