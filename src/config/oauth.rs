//! OAuth client configuration
//!
//! Only needed for `auth exchange`; every field is optional.

use secrecy::Secret;
use serde::Deserialize;

use super::error::ValidationError;

/// TikTok developer app credentials
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthConfig {
    pub client_key: Option<String>,

    pub client_secret: Option<Secret<String>>,

    pub redirect_uri: Option<String>,
}

impl OAuthConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(uri) = &self.redirect_uri {
            if !uri.starts_with("http://") && !uri.starts_with("https://") {
                return Err(ValidationError::InvalidRedirectUri);
            }
        }
        Ok(())
    }
}
