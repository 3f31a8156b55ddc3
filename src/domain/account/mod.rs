//! Account module - stored creator tokens and their verification snapshots.

mod account;
mod creator_info;
mod token;

pub use account::Account;
pub use creator_info::{privacy_label, CreatorInfo, FALLBACK_PRIVACY_LEVELS, PUBLIC_TO_EVERYONE};
pub use token::BearerToken;
