//! Authentication module for Filebox.
//!
//! This module provides password hashing, Basic credential decoding and
//! the token session service.

mod credentials;
mod password;
mod service;

pub use credentials::BasicCredentials;
pub use password::{hash_password, verify_password, PasswordError, PasswordScheme};
pub use service::{session_key, AuthService, DEFAULT_SESSION_TTL};
