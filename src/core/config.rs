//! Client configuration from the environment (and `.env`, loaded in main).

use std::env;
use std::time::Duration;

/// Backend used when `DATASET_CHAT_SERVER_URL` is unset.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL without trailing slash.
    pub server_url: String,
    /// Per-request timeout for every backend call.
    pub timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server URL '{0}': expected an http:// or https:// address")]
    InvalidServerUrl(String),
    #[error("DATASET_CHAT_TIMEOUT_SECS must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

/// Load configuration from environment. `server_override` (from `--server`) wins over
/// `DATASET_CHAT_SERVER_URL`.
pub fn load(server_override: Option<&str>) -> Result<Config, ConfigError> {
    let server_url = match server_override {
        Some(url) => url.to_string(),
        None => env::var("DATASET_CHAT_SERVER_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
    };
    let timeout = env::var("DATASET_CHAT_TIMEOUT_SECS").ok();
    from_parts(&server_url, timeout.as_deref())
}

fn from_parts(server_url: &str, timeout: Option<&str>) -> Result<Config, ConfigError> {
    let server_url = server_url.trim().trim_end_matches('/');
    if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
        return Err(ConfigError::InvalidServerUrl(server_url.to_string()));
    }

    let timeout_secs = match timeout.map(str::trim).filter(|s| !s.is_empty()) {
        None => DEFAULT_TIMEOUT_SECS,
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => return Err(ConfigError::InvalidTimeout(raw.to_string())),
        },
    };

    Ok(Config {
        server_url: server_url.to_string(),
        timeout: Duration::from_secs(timeout_secs),
    })
}
