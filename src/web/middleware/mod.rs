//! Middleware for the doorkeep web API.

pub mod auth;
pub mod cors;

pub use auth::{session_auth, AuthUser, SESSION_COOKIE};
pub use cors::create_cors_layer;
