//! Response DTOs for the doorkeep web API.

use serde::Serialize;

use crate::db::User;

/// Generic success response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always `"success"`.
    pub status: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl StatusResponse {
    /// Build a success response with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

/// Public view of a user account. The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Response for the authenticated user endpoint.
#[derive(Debug, Serialize)]
pub struct LoggedUserResponse {
    /// Always `"success"`.
    pub status: &'static str,
    /// The authenticated user.
    pub user: UserInfo,
}

impl LoggedUserResponse {
    pub fn new(user: &User) -> Self {
        Self {
            status: "success",
            user: UserInfo::from(user),
        }
    }
}
