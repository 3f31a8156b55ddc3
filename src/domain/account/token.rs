//! Bearer token value object.

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// TikTok-issued bearer token authorizing calls for one creator.
///
/// The raw value is only reachable through [`BearerToken::expose`]; `Debug`
/// output is redacted so tokens never end up in logs.
#[derive(Clone)]
pub struct BearerToken(Secret<String>);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Secret::new(token.into()))
    }

    /// Returns the raw token for use in an `Authorization` header or storage.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.expose().trim().is_empty()
    }

    /// Compares token text without exposing either value to the caller.
    pub fn same_as(&self, other: &BearerToken) -> bool {
        self.expose() == other.expose()
    }
}

impl Default for BearerToken {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "BearerToken(<empty>)")
        } else {
            write!(f, "BearerToken([REDACTED])")
        }
    }
}

impl From<&str> for BearerToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BearerToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Serialize for BearerToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for BearerToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
