//! OAuth Port - exchanges an authorization code for a creator bearer token.

use async_trait::async_trait;
use secrecy::Secret;
use serde::Deserialize;

use super::ApiError;
use crate::domain::account::BearerToken;

/// Port for TikTok's `/v2/oauth/token/` authorization-code grant.
#[async_trait]
pub trait OAuthTokenExchange: Send + Sync {
    async fn exchange_code(&self, request: &TokenExchangeRequest) -> Result<TokenGrant, ApiError>;
}

/// Inputs for the authorization-code grant. All fields are required.
#[derive(Debug, Clone)]
pub struct TokenExchangeRequest {
    pub code: String,
    pub client_key: String,
    pub client_secret: Secret<String>,
    pub redirect_uri: String,
}

impl TokenExchangeRequest {
    pub fn new(
        code: impl Into<String>,
        client_key: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            client_key: client_key.into(),
            client_secret: Secret::new(client_secret.into()),
            redirect_uri: redirect_uri.into(),
        }
    }
}

/// Tokens issued by a successful exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: BearerToken,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub refresh_token: Option<BearerToken>,
    #[serde(default)]
    pub open_id: String,
    #[serde(default)]
    pub scope: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn grant_decodes_tiktok_payload() {
        let grant: TokenGrant = serde_json::from_str(
            r#"{"access_token":"act.1","expires_in":86400,"open_id":"o-1","refresh_expires_in":31536000,"refresh_token":"rft.1","scope":"user.info.basic,video.publish","token_type":"Bearer"}"#,
        )
        .unwrap();
        assert_eq!(grant.access_token.expose(), "act.1");
        assert_eq!(grant.expires_in, 86400);
        assert_eq!(grant.scope, "user.info.basic,video.publish");
        assert_eq!(grant.refresh_token.unwrap().expose(), "rft.1");
    }

    #[test]
    fn request_keeps_secret_wrapped() {
        let request = TokenExchangeRequest::new("code", "key", "shh", "https://x/callback");
        assert_eq!(request.client_secret.expose_secret(), "shh");
        assert!(!format!("{:?}", request).contains("shh"));
    }
}
