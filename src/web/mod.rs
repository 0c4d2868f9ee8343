//! HTTP API module for Filebox.
//!
//! This module exposes users, sessions and the file tree over a JSON API.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
