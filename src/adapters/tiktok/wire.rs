//! TikTok response envelopes and their decoding into tagged replies.
//!
//! Content Posting responses look like
//!
//! ```text
//! {"data": {...}, "error": {"code": "ok", "message": "", "log_id": "..."}}
//! ```
//!
//! while the OAuth endpoint returns the token fields at top level, or
//! `{"error": "...", "error_description": "..."}`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::ports::ApiError;

const DEFAULT_API_ERROR: &str = "TikTok API error";
const DEFAULT_OAUTH_ERROR: &str = "Token exchange failed";

/// A decoded TikTok reply: either the payload or the upstream message.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply<T> {
    Ok(T),
    Err { message: String },
}

impl<T> ApiReply<T> {
    pub fn into_result(self) -> Result<T, ApiError> {
        match self {
            ApiReply::Ok(data) => Ok(data),
            ApiReply::Err { message } => Err(ApiError::upstream(message)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<EnvelopeError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    log_id: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Decodes a Content Posting envelope.
///
/// Anything other than `error.code == "ok"` is an upstream error; a
/// missing or mis-shaped `data` on an ok reply is a transport error.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiReply<T>, ApiError> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| ApiError::transport(format!("Malformed TikTok response: {}", e)))?;

    let error = envelope.error;
    let is_ok = error
        .as_ref()
        .and_then(|e| e.code.as_deref())
        .is_some_and(|code| code == "ok");

    if !is_ok {
        if let Some(log_id) = error.as_ref().and_then(|e| e.log_id.as_deref()) {
            tracing::debug!(log_id, "TikTok returned an error envelope");
        }
        let message = non_empty(error.and_then(|e| e.message))
            .unwrap_or_else(|| DEFAULT_API_ERROR.to_string());
        return Ok(ApiReply::Err { message });
    }

    let data = envelope
        .data
        .ok_or_else(|| ApiError::transport("Malformed TikTok response: missing data"))?;
    let data = serde_json::from_value(data)
        .map_err(|e| ApiError::transport(format!("Malformed TikTok response data: {}", e)))?;

    Ok(ApiReply::Ok(data))
}

/// Decodes an OAuth token endpoint reply.
///
/// Any truthy `error` field marks a failure; the message prefers
/// `error_description`, then a textual `error`.
pub fn decode_oauth<T: DeserializeOwned>(body: &str) -> Result<ApiReply<T>, ApiError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::transport(format!("Malformed TikTok response: {}", e)))?;

    if value.get("error").is_some_and(is_truthy) {
        let text = |key: &str| non_empty(value.get(key).and_then(Value::as_str).map(str::to_string));
        let message = text("error_description")
            .or_else(|| text("error"))
            .unwrap_or_else(|| DEFAULT_OAUTH_ERROR.to_string());
        return Ok(ApiReply::Err { message });
    }

    serde_json::from_value(value)
        .map(ApiReply::Ok)
        .map_err(|e| ApiError::transport(format!("Malformed TikTok token response: {}", e)))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
