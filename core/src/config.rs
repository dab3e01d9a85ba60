//! Client configuration.
//!
//! The API key is always passed explicitly; `from_env` is a convenience for
//! binaries and reads it once at construction time.

use std::env;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.bemyguest.com.sg";
pub const API_KEY_VAR: &str = "BEMYGUEST_API_KEY";
pub const BASE_URL_VAR: &str = "BEMYGUEST_BASE_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API key required: set BEMYGUEST_API_KEY or pass one to Config::new")]
    MissingApiKey,
}

/// Connection settings shared by all controllers of one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    base_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Load from `BEMYGUEST_API_KEY` and the optional `BEMYGUEST_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);
        if let Ok(url) = env::var(BASE_URL_VAR) {
            config = config.with_base_url(url);
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
