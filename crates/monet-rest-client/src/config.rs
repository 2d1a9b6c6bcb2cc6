//! Client configuration

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::auth::ApiKey;
use crate::error::ConfigError;

/// Origin of the hosted service
pub const DEFAULT_BASE_URL: &str = "https://monet.vision";

/// Applied when no timeout (or a zero timeout) is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

pub const API_KEY_ENV: &str = "MONET_API_KEY";
pub const TIMEOUT_ENV: &str = "MONET_TIMEOUT_MS";
pub const BASE_URL_ENV: &str = "MONET_BASE_URL";

/// Raw client configuration, validated by [`MonetConfig::validate`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MonetConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl MonetConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Read `MONET_API_KEY`, `MONET_TIMEOUT_MS` and `MONET_BASE_URL`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_ms = match lookup(TIMEOUT_ENV) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidTimeout(format!("{}={}: {}", TIMEOUT_ENV, raw, e)))?,
            ),
            None => None,
        };

        Ok(Self {
            api_key: lookup(API_KEY_ENV).unwrap_or_default(),
            timeout_ms,
            base_url: lookup(BASE_URL_ENV),
        })
    }

    /// Check every field and produce the immutable settings the client runs with
    pub fn validate(&self) -> Result<ClientSettings, ConfigError> {
        let api_key = ApiKey::parse(self.api_key.as_str())?;

        let timeout = match self.timeout_ms {
            None | Some(0) => DEFAULT_TIMEOUT,
            Some(ms) => Duration::from_millis(ms),
        };

        let raw_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let mut base_url =
            Url::parse(raw_url).map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", raw_url, e)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(raw_url.to_string()));
        }
        // Endpoint paths are joined under the base path, so it must end in `/`
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(ClientSettings {
            api_key,
            timeout,
            base_url,
        })
    }
}

/// Validated configuration
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: ApiKey,
    pub timeout: Duration,
    pub base_url: Url,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_applied() {
        let settings = MonetConfig::new("monet_key").validate().unwrap();
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert_eq!(settings.base_url.as_str(), "https://monet.vision/");
    }

    #[test]
    fn test_zero_timeout_means_default() {
        let settings = MonetConfig::new("monet_key").with_timeout_ms(0).validate().unwrap();
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);

        let settings = MonetConfig::new("monet_key")
            .with_timeout(Duration::from_secs(5))
            .validate()
            .unwrap();
        assert_eq!(settings.timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_missing_api_key_field() {
        let config: MonetConfig = serde_json::from_str(r#"{ "timeout_ms": 1000 }"#).unwrap();
        assert_eq!(config.validate().unwrap_err(), ConfigError::MissingApiKey);
    }

    #[test]
    fn test_base_path_gains_trailing_slash() {
        let settings = MonetConfig::new("monet_key")
            .with_base_url("http://gateway.local/monet")
            .validate()
            .unwrap();
        assert_eq!(settings.base_url.as_str(), "http://gateway.local/monet/");

        let settings = MonetConfig::new("monet_key")
            .with_base_url("http://gateway.local/monet/")
            .validate()
            .unwrap();
        assert_eq!(settings.base_url.as_str(), "http://gateway.local/monet/");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = MonetConfig::new("monet_key")
            .with_base_url("mailto:ops@example.com")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (API_KEY_ENV, "monet_env"),
            (TIMEOUT_ENV, "2500"),
            (BASE_URL_ENV, "http://localhost:8080"),
        ]
        .into_iter()
        .collect();

        let config = MonetConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.api_key, "monet_env");
        assert_eq!(config.timeout_ms, Some(2500));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_timeout() {
        let err = MonetConfig::from_lookup(|k| (k == TIMEOUT_ENV).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }
}
