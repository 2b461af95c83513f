//! Error types for the Instant Assistant core library
//!
//! Errors are grouped by where they come from: the local filesystem, the
//! remote assistant API, and input/configuration validation.

use thiserror::Error;

pub mod api;
pub mod io;
pub mod validation;

pub use self::api::ApiError;
pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Instant Assistant core library
///
/// Errors are categorized into three main types:
/// - I/O errors: file system access while scanning or reading uploads
/// - API errors: failures reported by (or while talking to) the remote API
/// - Validation errors: bad configuration or missing credentials
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Remote API errors
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// Conversions from external error types

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Self::Api(ApiError::from(source))
    }
}
