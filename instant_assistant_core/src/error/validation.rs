//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A required credential is absent from the environment
    #[error("Please set {variable} environment variable!")]
    MissingCredential { variable: String },
}

impl ValidationError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(message: &str) -> Self {
        Self::InvalidConfiguration {
            message: message.to_string(),
        }
    }

    /// Create a missing credential error
    pub fn missing_credential(variable: &str) -> Self {
        Self::MissingCredential {
            variable: variable.to_string(),
        }
    }
}
