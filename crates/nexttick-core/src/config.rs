//! Client configuration for the prediction service.

use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::{RetryConfig, ValidationError};

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

pub const ENV_API_BASE_URL: &str = "NEXTTICK_API_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "NEXTTICK_TIMEOUT_MS";

/// Where and how the prediction service is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout_ms: u64,
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `NEXTTICK_*` environment variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientConfig::from_env`] but reads variables through `lookup`.
    ///
    /// An unparsable timeout falls back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base_url) = lookup(ENV_API_BASE_URL) {
            config.api_base_url = base_url;
        }

        if let Some(timeout_ms) = lookup(ENV_TIMEOUT_MS).and_then(|raw| raw.trim().parse().ok()) {
            config.timeout_ms = timeout_ms;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let base_url = self.api_base_url.trim();
        if base_url.is_empty() {
            return Err(ValidationError::EmptyBaseUrl);
        }

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl {
                value: self.api_base_url.clone(),
            });
        }

        if self.timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }

        Ok(())
    }

    /// Base URL without surrounding whitespace or trailing slashes.
    pub fn normalized_base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).expect("defaults are valid");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_API_BASE_URL, "https://predict.example.test/api/"),
            (ENV_TIMEOUT_MS, "15000"),
        ]))
        .expect("overrides are valid");

        assert_eq!(config.normalized_base_url(), "https://predict.example.test/api");
        assert_eq!(config.timeout_ms, 15_000);
    }

    #[test]
    fn unparsable_timeout_keeps_default() {
        let config = ClientConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_MS, "soon")]))
            .expect("config is valid");
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn rejects_bad_base_urls_and_zero_timeout() {
        let err = ClientConfig::default()
            .with_api_base_url("  ")
            .validate()
            .expect_err("must fail");
        assert_eq!(err, ValidationError::EmptyBaseUrl);

        let err = ClientConfig::default()
            .with_api_base_url("127.0.0.1:8000")
            .validate()
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBaseUrl { .. }));

        let err = ClientConfig::default()
            .with_timeout_ms(0)
            .validate()
            .expect_err("must fail");
        assert_eq!(err, ValidationError::ZeroTimeout);
    }
}
