//! API credential handling
//!
//! The API key is read once from the environment and kept in a
//! [`SecureString`], which zeros its memory on drop and never prints its
//! contents through `Debug` or `Display`.

use crate::Result;
use crate::error::ValidationError;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// A string that zeros its memory when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    /// Create a new SecureString from a regular string
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Borrow the secret (use only at the point it is sent)
    pub fn expose_secret(&self) -> &str {
        &self.inner
    }

    /// Whether the secret is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.inner.trim().is_empty()
    }

    /// Constant-time comparison
    pub fn constant_time_eq(&self, other: &Self) -> bool {
        let (a, b) = (self.inner.as_bytes(), other.inner.as_bytes());
        if a.len() != b.len() {
            return false;
        }

        let mut result = 0u8;
        for (x, y) in a.iter().zip(b.iter()) {
            result |= x ^ y;
        }
        result == 0
    }
}

// Implement Debug to prevent accidental credential logging
impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(***)")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

impl PartialEq for SecureString {
    fn eq(&self, other: &Self) -> bool {
        self.constant_time_eq(other)
    }
}

impl Eq for SecureString {}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Turn the raw value of a credential variable into a key
///
/// Unset and blank values are both treated as missing.
pub fn api_key_from_value(variable: &str, value: Option<String>) -> Result<SecureString> {
    match value.map(SecureString::new) {
        Some(key) if !key.is_blank() => Ok(key),
        _ => Err(ValidationError::missing_credential(variable).into()),
    }
}

/// Read the API key from [`API_KEY_ENV`]
pub fn api_key_from_env() -> Result<SecureString> {
    api_key_from_value(API_KEY_ENV, std::env::var(API_KEY_ENV).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_secure_string_debug_is_redacted() {
        let secure = SecureString::new("sk-secret");
        let debug_str = format!("{secure:?}");
        assert_eq!(debug_str, "SecureString(***)");
        assert!(!debug_str.contains("secret"));
        assert_eq!(format!("{secure}"), "***");
    }

    #[test]
    fn test_expose_secret() {
        let secure = SecureString::new("sk-secret");
        assert_eq!(secure.expose_secret(), "sk-secret");
    }

    #[test]
    fn test_constant_time_comparison() {
        let a = SecureString::new("sk-123");
        let b = SecureString::new("sk-123");
        let c = SecureString::new("sk-456");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.constant_time_eq(&SecureString::new("sk-1234")));
    }

    #[test]
    fn test_missing_value_is_rejected() {
        let err = api_key_from_value(API_KEY_ENV, None).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_blank_value_is_rejected() {
        assert!(api_key_from_value(API_KEY_ENV, Some("   ".to_string())).is_err());
    }

    #[test]
    fn test_present_value_is_accepted() {
        let key = api_key_from_value(API_KEY_ENV, Some("sk-live".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "sk-live");
    }
}
