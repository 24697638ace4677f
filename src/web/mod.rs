//! Web API module for doorkeep.
//!
//! This module provides the REST API for account registration, login,
//! password change, and password reset.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
