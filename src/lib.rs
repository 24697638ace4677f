//! doorkeep - a small user account service.
//!
//! Registration, login, password change, and password reset over a JSON
//! HTTP API, with argon2 credential hashing and JWT session cookies.

pub mod account;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod mail;
pub mod web;

pub use account::{
    change_password, check_reset_token, login, register, request_password_reset, reset_password,
    AccountError, RegisterData,
};
pub use auth::{
    hash_password, verify_password, PasswordError, ResetClaims, SessionClaims, TokenError,
    TokenService,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{DoorkeepError, Result};
pub use mail::{Mailer, SmtpMailer};
pub use web::WebServer;
