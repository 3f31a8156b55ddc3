//! Creator capability snapshot returned by TikTok's creator info query.

use serde::{Deserialize, Serialize};

/// Privacy level TikTok offers to every account.
pub const PUBLIC_TO_EVERYONE: &str = "PUBLIC_TO_EVERYONE";

/// Privacy options offered before an account has been verified.
pub const FALLBACK_PRIVACY_LEVELS: [&str; 3] =
    [PUBLIC_TO_EVERYONE, "MUTUAL_FOLLOW_FRIENDS", "SELF_ONLY"];

/// Per-account capability metadata needed to build a valid publish request.
///
/// Field names follow the TikTok wire format so the same type decodes the
/// API payload and round-trips through local storage. A snapshot is never
/// patched: re-verification replaces it as a whole.
///
/// Every field defaults when absent. A stored snapshot that lost a field
/// must not make the whole account file unreadable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatorInfo {
    pub creator_username: String,
    pub creator_nickname: String,
    pub creator_avatar_url: String,
    /// Ordered as returned by TikTok; the first entry is the default choice.
    pub privacy_level_options: Vec<String>,
    pub comment_disabled: bool,
    pub duet_disabled: bool,
    pub stitch_disabled: bool,
    pub max_video_post_duration_sec: u32,
}

/// Renders a privacy level for humans: `SELF_ONLY` -> `SELF ONLY`.
pub fn privacy_label(level: &str) -> String {
    level.replace('_', " ")
}
