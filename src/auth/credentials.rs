//! Basic authentication credential decoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{FileboxError, Result};

/// Email and password pair taken from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

impl BasicCredentials {
    /// Decode an `Authorization` header value of the form `Basic base64(email:password)`.
    ///
    /// The password may itself contain `:`; only the first one separates the pair.
    pub fn from_header(value: &str) -> Result<Self> {
        let encoded = value
            .strip_prefix("Basic ")
            .ok_or_else(|| FileboxError::Auth("expected Basic credentials".to_string()))?;

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| FileboxError::Auth("malformed Basic credentials".to_string()))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| FileboxError::Auth("malformed Basic credentials".to_string()))?;

        let (email, password) = decoded
            .split_once(':')
            .ok_or_else(|| FileboxError::Auth("malformed Basic credentials".to_string()))?;

        if email.is_empty() || password.is_empty() {
            return Err(FileboxError::Auth("empty credentials".to_string()));
        }

        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}
