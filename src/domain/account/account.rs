//! Account aggregate - one stored creator token and its verification state.

use serde::{Deserialize, Serialize};

use super::creator_info::{CreatorInfo, FALLBACK_PRIVACY_LEVELS, PUBLIC_TO_EVERYONE};
use super::token::BearerToken;
use crate::domain::foundation::{AccountId, Timestamp};

/// A TikTok creator account the user has stored locally.
///
/// # Invariants
///
/// - `creator_info` and `fetched_at` are set together and cleared together.
/// - Changing the token text clears the verification in the same call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default = "AccountId::generate")]
    id: AccountId,
    #[serde(default)]
    label: String,
    #[serde(default)]
    token: BearerToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    creator_info: Option<CreatorInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fetched_at: Option<Timestamp>,
}

impl Account {
    /// Creates an unverified account with a fresh id.
    pub fn new(label: impl Into<String>, token: impl Into<BearerToken>) -> Self {
        Self::with_id(AccountId::generate(), label, token)
    }

    pub fn with_id(id: AccountId, label: impl Into<String>, token: impl Into<BearerToken>) -> Self {
        Self {
            id,
            label: label.into(),
            token: token.into(),
            creator_info: None,
            fetched_at: None,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    pub fn creator_info(&self) -> Option<&CreatorInfo> {
        self.creator_info.as_ref()
    }

    pub fn fetched_at(&self) -> Option<Timestamp> {
        self.fetched_at
    }

    pub fn is_verified(&self) -> bool {
        self.creator_info.is_some()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Replaces the token. Any prior verification is dropped if the text changed.
    pub fn set_token(&mut self, token: impl Into<BearerToken>) {
        let token = token.into();
        if !self.token.same_as(&token) {
            self.creator_info = None;
            self.fetched_at = None;
        }
        self.token = token;
    }

    /// Stores a fresh creator info snapshot, replacing any previous one.
    pub fn record_verification(&mut self, info: CreatorInfo, fetched_at: Timestamp) {
        self.creator_info = Some(info);
        self.fetched_at = Some(fetched_at);
    }

    /// Label, then creator username, then id.
    pub fn display_name(&self) -> String {
        if !self.label.trim().is_empty() {
            return self.label.clone();
        }
        match &self.creator_info {
            Some(info) if !info.creator_username.is_empty() => info.creator_username.clone(),
            _ => self.id.to_string(),
        }
    }

    /// Privacy levels a job for this account may pick from.
    ///
    /// Falls back to the standard levels when no snapshot lists any.
    pub fn privacy_options(&self) -> Vec<String> {
        match &self.creator_info {
            Some(info) if !info.privacy_level_options.is_empty() => {
                info.privacy_level_options.clone()
            }
            _ => FALLBACK_PRIVACY_LEVELS.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// First offered privacy level, or `PUBLIC_TO_EVERYONE` when unknown.
    pub fn default_privacy_level(&self) -> String {
        self.creator_info
            .as_ref()
            .and_then(|info| info.privacy_level_options.first().cloned())
            .unwrap_or_else(|| PUBLIC_TO_EVERYONE.to_string())
    }
}
