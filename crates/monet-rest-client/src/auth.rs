//! API key authentication for the REST API client

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

use crate::error::ConfigError;

/// Literal prefix every Monet API key starts with
pub const API_KEY_PREFIX: &str = "monet_";

/// A validated Monet API key
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Validate the key format
    pub fn parse(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if !token.starts_with(API_KEY_PREFIX) {
            return Err(ConfigError::InvalidApiKey {
                prefix: API_KEY_PREFIX,
            });
        }
        Ok(Self(token))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey({}***)", API_KEY_PREFIX)
    }
}

/// Authentication configuration for the client
#[derive(Debug, Clone)]
pub struct AuthConfig {
    api_key: ApiKey,
}

impl AuthConfig {
    pub fn new(api_key: ApiKey) -> Self {
        Self { api_key }
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// `Authorization: Bearer <key>` header, marked sensitive
    pub fn headers(&self) -> Result<HeaderMap, reqwest::header::InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose()))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}
