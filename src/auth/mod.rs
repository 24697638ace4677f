//! Authentication primitives: password hashing and token issuance.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use token::{ResetClaims, SessionClaims, TokenError, TokenService};
