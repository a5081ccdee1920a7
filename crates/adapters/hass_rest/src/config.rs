//! Home Assistant connection configuration.

use serde::Deserialize;
use url::Url;

/// Default Home Assistant address.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8123";

/// Connection settings for the Home Assistant REST API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HassConfig {
    /// Base URL of the Home Assistant instance.
    pub url: Url,
    /// Environment variable holding the long-lived access token.
    pub token_env: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HassConfig {
    fn default() -> Self {
        Self {
            url: Url::parse(DEFAULT_URL).expect("default Home Assistant URL should always be valid"),
            token_env: "HASS_TOKEN".to_string(),
            timeout_secs: 10,
        }
    }
}
