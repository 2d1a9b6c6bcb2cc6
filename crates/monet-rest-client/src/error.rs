//! Error types for the REST API client

use std::time::Duration;

use monet_api_contract::ApiError;
use reqwest::StatusCode;
use thiserror::Error;

/// Problems with the client configuration, raised before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("API key is missing")]
    MissingApiKey,

    #[error("Invalid API key format. Must start with '{prefix}'")]
    InvalidApiKey { prefix: &'static str },

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Errors that can occur when using the REST API client
#[derive(Debug, Error)]
pub enum MonetClientError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request timeout after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Request failed with status {status}: {error}")]
    RequestFailed { status: StatusCode, error: ApiError },

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Streaming response has no body")]
    EmptyStream,
}

impl MonetClientError {
    /// Error code carried by a failed request (`"unknown"` when the service sent none)
    pub fn code(&self) -> Option<&str> {
        match self {
            MonetClientError::RequestFailed { error, .. } => Some(&error.code),
            _ => None,
        }
    }

    /// HTTP status of a failed request
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            MonetClientError::RequestFailed { status, .. } => Some(*status),
            MonetClientError::Network(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, MonetClientError::Timeout(_))
    }
}

/// Result type alias for REST client operations
pub type RestClientResult<T> = Result<T, MonetClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_duration() {
        let err = MonetClientError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "Request timeout after 1500ms");
        assert!(err.is_timeout());
    }

    #[test]
    fn test_request_failed_exposes_code() {
        let err = MonetClientError::RequestFailed {
            status: StatusCode::PAYMENT_REQUIRED,
            error: ApiError::new("quota_exceeded", "No credits left"),
        };
        assert_eq!(err.code(), Some("quota_exceeded"));
        assert_eq!(err.status(), Some(StatusCode::PAYMENT_REQUIRED));
        assert!(err.to_string().contains("No credits left"));
    }
}
