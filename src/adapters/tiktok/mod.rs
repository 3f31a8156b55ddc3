//! TikTok adapters - HTTP client and scripted mock for the TikTok ports.

mod http_client;
mod mock_api;
pub mod wire;

pub use http_client::{TikTokClientConfig, TikTokHttpClient, DEFAULT_API_BASE_URL};
pub use mock_api::{MockCall, MockTikTokApi, MOCK_UPLOAD_URL};
