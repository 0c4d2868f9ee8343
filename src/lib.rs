//! Filebox - a small file-management backend.
//!
//! Users register and log in for session tokens, then manage a private tree
//! of folders, files and images over an HTTP API. Uploaded bytes are kept on
//! local disk and image uploads get thumbnails in the background.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod store;
pub mod web;

pub use auth::{AuthService, PasswordScheme};
pub use config::Config;
pub use db::{Database, NewUser, User};
pub use error::{FileboxError, Result};
pub use file::{ContentStore, FileTreeManager, Node, NodeType, ParentId};
pub use store::{MemorySessionStore, MetadataStore, SessionStore};
