//! API error types

use std::time::Duration;

/// Errors that can occur while calling the users endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-success HTTP status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, or the canonical reason when the body is empty.
        message: String,
    },

    /// Network error during the call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Response body was not a list of users.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns `true` if this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Network(_) => true,
            Self::Timeout(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::http(503, "unavailable").is_retryable());
        assert!(ApiError::http(429, "slow down").is_retryable());
        assert!(!ApiError::http(404, "not found").is_retryable());
        assert!(ApiError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!ApiError::parse_with_body("bad json", "{").is_retryable());
        assert!(!ApiError::InvalidUrl("x".into()).is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(ApiError::http(404, "Not Found").to_string(), "HTTP 404: Not Found");
        let err: Error = ApiError::parse_with_body("expected array", "{}").into();
        assert_eq!(err.to_string(), "Response parse error: expected array");
        assert!(!err.is_retryable());
    }
}
