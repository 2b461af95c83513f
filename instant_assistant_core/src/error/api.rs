//! Remote API error types

use thiserror::Error;

/// Errors raised while talking to the assistant API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The API answered with a non-success status
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The response body could not be understood
    #[error("Unexpected API response: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Create a status error with code and message
    pub fn status(status: u16, message: &str) -> Self {
        Self::Status {
            status,
            message: message.to_string(),
        }
    }

    /// Create a transport error without an underlying reqwest error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Short message suitable for per-file log lines
    pub fn message(&self) -> &str {
        match self {
            Self::Status { message, .. }
            | Self::Transport { message, .. }
            | Self::Decode { message } => message,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(source: reqwest::Error) -> Self {
        if source.is_decode() {
            return Self::decode(source.to_string());
        }
        if let Some(status) = source.status() {
            return Self::status(status.as_u16(), &source.to_string());
        }
        Self::Transport {
            message: source.to_string(),
            source: Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error() {
        let error = ApiError::status(500, "Internal server error");
        assert!(error.to_string().contains("500"));
        assert!(error.to_string().contains("Internal server error"));
        assert_eq!(error.message(), "Internal server error");
    }

    #[test]
    fn test_transport_error() {
        let error = ApiError::transport("connection refused");
        assert!(error.to_string().contains("connection refused"));
        assert_eq!(error.message(), "connection refused");
    }

    #[test]
    fn test_decode_error() {
        let error = ApiError::decode("missing field `id`");
        assert!(error.to_string().contains("Unexpected API response"));
        assert_eq!(error.message(), "missing field `id`");
    }
}
