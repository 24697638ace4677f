//! Request DTOs for the doorkeep web API.
//!
//! All body fields deserialize as optional so the use-case layer decides
//! which ones are required and answers with a single consistent message.

use serde::Deserialize;

/// Registration request.
#[derive(Debug, Deserialize, Default)]
pub struct RegisterRequest {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
    /// Plaintext password confirmation.
    #[serde(default)]
    pub password_confirmation: Option<String>,
    /// Terms acceptance flag.
    #[serde(default, rename = "termAndCondition")]
    pub term_and_condition: bool,
}

/// Login request.
#[derive(Debug, Deserialize, Default)]
pub struct LoginRequest {
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Plaintext password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Password change request (authenticated).
#[derive(Debug, Deserialize, Default)]
pub struct ChangePasswordRequest {
    /// New plaintext password.
    #[serde(default)]
    pub password: Option<String>,
    /// Confirmation of the new password.
    #[serde(default)]
    pub password_confirmation: Option<String>,
}

/// Password reset email request.
#[derive(Debug, Deserialize, Default)]
pub struct SendResetEmailRequest {
    /// Email address of the account to reset.
    #[serde(default)]
    pub email: Option<String>,
}

/// Password reset completion request.
#[derive(Debug, Deserialize, Default)]
pub struct ResetPasswordRequest {
    /// New plaintext password.
    #[serde(default)]
    pub password: Option<String>,
    /// Confirmation of the new password.
    #[serde(default)]
    pub password_confirmation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_full() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"name":"Alice","email":"a@x.com","password":"pw","password_confirmation":"pw","termAndCondition":true}"#,
        )
        .unwrap();
        assert_eq!(req.name.as_deref(), Some("Alice"));
        assert!(req.term_and_condition);
    }

    #[test]
    fn test_register_request_missing_fields_deserialize() {
        // Presence checks are the use case's job, not serde's
        let req: RegisterRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert!(req.name.is_none());
        assert!(!req.term_and_condition);
    }

    #[test]
    fn test_login_request_empty_body() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
        assert!(req.password.is_none());
    }
}
