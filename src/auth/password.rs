//! Password hashing for Filebox.
//!
//! Two schemes are supported:
//! - `sha1`: lowercase hex SHA-1 digest, compatible with existing accounts
//! - `argon2`: Argon2id PHC string with a random salt
//!
//! Verification detects the scheme from the stored value, so changing the
//! configured scheme only affects newly registered users.

use std::fmt;
use std::str::FromStr;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand_core::OsRng;
use sha1::{Digest, Sha1};
use thiserror::Error;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Scheme used to hash new passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordScheme {
    /// Unsalted SHA-1 hex digest.
    #[default]
    Sha1,
    /// Argon2id PHC string.
    Argon2,
}

impl PasswordScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            PasswordScheme::Sha1 => "sha1",
            PasswordScheme::Argon2 => "argon2",
        }
    }

    /// Detect the scheme of a stored hash.
    pub fn detect(stored: &str) -> Self {
        if stored.starts_with("$argon2") {
            PasswordScheme::Argon2
        } else {
            PasswordScheme::Sha1
        }
    }
}

impl fmt::Display for PasswordScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PasswordScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sha1" => Ok(PasswordScheme::Sha1),
            "argon2" => Ok(PasswordScheme::Argon2),
            _ => Err(format!("unknown password scheme: {s}")),
        }
    }
}

fn sha1_hex(password: &str) -> String {
    hex::encode(Sha1::digest(password.as_bytes()))
}

/// Hash a password with the given scheme.
///
/// # Examples
///
/// ```
/// use filebox::auth::{hash_password, PasswordScheme};
///
/// let hash = hash_password("password", PasswordScheme::Sha1).unwrap();
/// assert_eq!(hash, "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8");
/// ```
pub fn hash_password(password: &str, scheme: PasswordScheme) -> Result<String, PasswordError> {
    match scheme {
        PasswordScheme::Sha1 => Ok(sha1_hex(password)),
        PasswordScheme::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            let hash = Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map_err(|e| PasswordError::HashError(e.to_string()))?;
            Ok(hash.to_string())
        }
    }
}

/// Verify a password against a stored hash of either scheme.
pub fn verify_password(password: &str, stored: &str) -> Result<(), PasswordError> {
    match PasswordScheme::detect(stored) {
        PasswordScheme::Sha1 => {
            if sha1_hex(password) == stored.to_lowercase() {
                Ok(())
            } else {
                Err(PasswordError::VerificationFailed)
            }
        }
        PasswordScheme::Argon2 => {
            let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::InvalidHash)?;
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .map_err(|_| PasswordError::VerificationFailed)
        }
    }
}
