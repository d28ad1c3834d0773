//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! ## Variables
//!
//! | Name | Required | Default |
//! |------|----------|---------|
//! | `COINGECKO_BASE_URL` | yes | - |
//! | `COINGECKO_API_KEY` | yes | - |
//! | `COINGECKO_REVALIDATE_SECS` | no | `60` |
//!
//! ## Usage
//!
//! The config is built once at startup and handed to the components that need
//! it. There is no global instance, so tests construct their own:
//!
//! ```rust
//! use lib_core::Config;
//!
//! let config = Config::new("http://127.0.0.1:9999/api/v3", "test-key");
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{AppError, Result};
use lib_utils::envs;

/// Revalidation window applied when a fetch does not ask for one.
pub const DEFAULT_REVALIDATE_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Root of the CoinGecko REST API, e.g. `https://pro-api.coingecko.com/api/v3`
    pub coingecko_base_url: String,

    /// Value sent in the `x_cg_pro_api_key` header on every request
    pub coingecko_api_key: String,

    /// Default revalidation window in seconds for cached responses
    ///
    /// `0` disables response caching.
    pub revalidate_secs: u64,
}

impl Config {
    /// Build a config with the default revalidation window.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            coingecko_base_url: base_url.into(),
            coingecko_api_key: api_key.into(),
            revalidate_secs: DEFAULT_REVALIDATE_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if a required variable is missing or an
    /// optional one cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let coingecko_base_url = envs::get_env("COINGECKO_BASE_URL")
            .map_err(|e| AppError::Config(format!("Could not get base url: {}", e)))?;

        let coingecko_api_key = envs::get_env("COINGECKO_API_KEY")
            .map_err(|e| AppError::Config(format!("Could not get api key: {}", e)))?;

        let revalidate_secs =
            envs::get_env_parse_or("COINGECKO_REVALIDATE_SECS", DEFAULT_REVALIDATE_SECS)
                .map_err(|e| AppError::Config(e.to_string()))?;

        Ok(Self {
            coingecko_base_url,
            coingecko_api_key,
            revalidate_secs,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let base = self.coingecko_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AppError::Config(
                "COINGECKO_BASE_URL must be an absolute http(s) URL".to_string(),
            ));
        }

        if self.coingecko_api_key.trim().is_empty() {
            return Err(AppError::Config("COINGECKO_API_KEY cannot be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_https_base() {
        let config = Config::new("https://pro-api.coingecko.com/api/v3", "key");
        assert!(config.validate().is_ok());
        assert_eq!(config.revalidate_secs, DEFAULT_REVALIDATE_SECS);
    }

    #[test]
    fn test_validate_rejects_relative_base() {
        let config = Config::new("api.coingecko.com", "key");
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_blank_key() {
        let config = Config::new("https://api.coingecko.com/api/v3", "  ");
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    // The only test in this crate that touches these variables.
    #[test]
    fn test_from_env_fails_fast_without_required_values() {
        std::env::remove_var("COINGECKO_BASE_URL");
        std::env::remove_var("COINGECKO_API_KEY");
        let err = Config::from_env().expect_err("missing base url must fail");
        assert!(err.to_string().contains("base url"));

        std::env::set_var("COINGECKO_BASE_URL", "https://api.coingecko.com/api/v3");
        let err = Config::from_env().expect_err("missing api key must fail");
        assert!(err.to_string().contains("api key"));

        std::env::set_var("COINGECKO_API_KEY", "key");
        std::env::set_var("COINGECKO_REVALIDATE_SECS", "30");
        let config = Config::from_env().expect("complete environment should load");
        assert_eq!(config.revalidate_secs, 30);

        std::env::remove_var("COINGECKO_BASE_URL");
        std::env::remove_var("COINGECKO_API_KEY");
        std::env::remove_var("COINGECKO_REVALIDATE_SECS");
    }
}
