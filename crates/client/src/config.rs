//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured when present.
//!
//! ## Variables
//!
//! - `RETURNSHIELD_API_URL` - API base URL, e.g. `https://api.returnshield.app/api`.
//!   Required for any network call; a trailing `/` is stripped.
//! - `RETURNSHIELD_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `RETURNSHIELD_TOKEN_PATH` - Token file (default: `<data dir>/returnshield/returnshield_token`)
//! - `RETURNSHIELD_BROADCAST_ERRORS` - Publish API errors on the notification bus (default: true)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use returnshield_auth::TOKEN_STORAGE_KEY;

use crate::error::ApiError;

pub const API_URL_ENV: &str = "RETURNSHIELD_API_URL";
pub const TIMEOUT_ENV: &str = "RETURNSHIELD_TIMEOUT_SECS";
pub const TOKEN_PATH_ENV: &str = "RETURNSHIELD_TOKEN_PATH";
pub const BROADCAST_ERRORS_ENV: &str = "RETURNSHIELD_BROADCAST_ERRORS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Normalized base URL; `None` until configured.
    pub api_url: Option<String>,
    pub timeout: Duration,
    pub token_path: PathBuf,
    pub broadcast_errors: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_path: default_token_path(),
            broadcast_errors: true,
        }
    }
}

impl ClientConfig {
    /// Config pointing at `api_url` with defaults for everything else.
    pub fn new(api_url: impl AsRef<str>) -> Self {
        Self::default().with_api_url(api_url)
    }

    /// Loads configuration from the environment (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but malformed.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(url) = env::var(API_URL_ENV) {
            config = config.with_api_url(url);
        }

        if let Ok(raw) = env::var(TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{TIMEOUT_ENV} must be a whole number of seconds"))?;
            config.timeout = Duration::from_secs(secs.max(1));
        }

        if let Ok(path) = env::var(TOKEN_PATH_ENV) {
            if !path.trim().is_empty() {
                config.token_path = PathBuf::from(path.trim());
            }
        }

        config.broadcast_errors = env::var(BROADCAST_ERRORS_ENV)
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true);

        Ok(config)
    }

    pub fn with_api_url(mut self, api_url: impl AsRef<str>) -> Self {
        self.api_url = normalize_base_url(api_url.as_ref());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    pub fn with_broadcast_errors(mut self, enabled: bool) -> Self {
        self.broadcast_errors = enabled;
        self
    }

    /// The base URL, or a configuration error before any request is attempted.
    pub fn base_url(&self) -> Result<&str, ApiError> {
        self.api_url
            .as_deref()
            .ok_or_else(|| ApiError::Config(format!("{API_URL_ENV} is not configured.")))
    }
}

/// Trim whitespace and a single trailing `/`. Empty input means "not configured".
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn default_token_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("returnshield")
        .join(TOKEN_STORAGE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = ClientConfig::new("https://api.example.com/api/");
        assert_eq!(config.base_url().unwrap(), "https://api.example.com/api");
    }

    #[test]
    fn missing_base_url_is_a_config_error() {
        let config = ClientConfig::new("   ");
        match config.base_url() {
            Err(ApiError::Config(msg)) => assert!(msg.contains(API_URL_ENV)),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn default_token_file_uses_the_storage_key() {
        let config = ClientConfig::default();
        assert_eq!(
            config.token_path.file_name().and_then(|n| n.to_str()),
            Some(TOKEN_STORAGE_KEY)
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.broadcast_errors);
    }
}
