//! Account use cases for doorkeep.
//!
//! Each use case is a sequence of validation gates; the first failing gate
//! short-circuits with a distinct [`AccountError`]. Infrastructure failures
//! (store, hashing, signing, mail) are wrapped so the web boundary can map
//! them to an opaque internal error.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::auth::{hash_password, verify_password, TokenService};
use crate::db::{NewUser, User, UserRepository};
use crate::DoorkeepError;
use crate::mail::{reset_email_body, Mailer, RESET_EMAIL_SUBJECT};

/// Account use-case errors.
#[derive(Error, Debug)]
pub enum AccountError {
    /// A required field is missing or empty (terms not accepted counts too).
    #[error("all fields are required")]
    MissingFields,

    /// Password and confirmation do not match.
    #[error("password and confirmation don't match")]
    PasswordMismatch,

    /// The email is already registered.
    #[error("email already exists")]
    EmailExists,

    /// No account for the given email or id.
    #[error("not a registered user")]
    UnknownUser,

    /// Wrong password for an existing account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Reset token forged, expired, or scoped to another user.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(String),

    /// Token signing failed.
    #[error("token error: {0}")]
    Token(String),

    /// Store failure.
    #[error("database error: {0}")]
    Database(String),

    /// Mail dispatch failure.
    #[error("mail error: {0}")]
    Mail(String),
}

impl From<crate::DoorkeepError> for AccountError {
    fn from(err: crate::DoorkeepError) -> Self {
        AccountError::Database(err.to_string())
    }
}

/// Registration input. Fields arrive straight from the request body, so
/// presence is checked here rather than at deserialization.
#[derive(Debug, Clone, Default)]
pub struct RegisterData {
    /// Display name.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
    /// Plaintext password confirmation.
    pub password_confirmation: Option<String>,
    /// Terms acceptance flag.
    pub accepted_terms: bool,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Register a new account and issue a session token.
///
/// Gates, in order:
/// 1. email already registered -> `EmailExists`
/// 2. any required field missing, or terms not accepted -> `MissingFields`
/// 3. password confirmation mismatch -> `PasswordMismatch`
///
/// The store's UNIQUE constraint on email backs up gate 1: a concurrent
/// registration that slips past the pre-check still yields `EmailExists`.
pub async fn register(
    repo: &UserRepository<'_>,
    tokens: &TokenService,
    data: RegisterData,
) -> Result<(User, String), AccountError> {
    if let Some(email) = present(&data.email) {
        if repo.email_exists(email).await? {
            return Err(AccountError::EmailExists);
        }
    }

    let (name, email, password, confirmation) = match (
        present(&data.name),
        present(&data.email),
        present(&data.password),
        present(&data.password_confirmation),
        data.accepted_terms,
    ) {
        (Some(n), Some(e), Some(p), Some(c), true) => (n, e, p, c),
        _ => return Err(AccountError::MissingFields),
    };

    if password != confirmation {
        return Err(AccountError::PasswordMismatch);
    }

    let password_hash =
        hash_password(password).map_err(|e| AccountError::Password(e.to_string()))?;

    let new_user = NewUser::new(name, email, password_hash, true);
    let user = match repo.create(&new_user).await {
        Ok(user) => user,
        Err(DoorkeepError::Conflict(_)) => return Err(AccountError::EmailExists),
        Err(e) => return Err(AccountError::Database(e.to_string())),
    };

    let token = tokens
        .issue_session(user.id)
        .map_err(|e| AccountError::Token(e.to_string()))?;

    info!(user_id = user.id, "new user registered");
    Ok((user, token))
}

/// Authenticate by email and password and issue a session token.
pub async fn login(
    repo: &UserRepository<'_>,
    tokens: &TokenService,
    email: Option<String>,
    password: Option<String>,
) -> Result<(User, String), AccountError> {
    let (email, password) = match (present(&email), present(&password)) {
        (Some(e), Some(p)) => (e, p),
        _ => return Err(AccountError::MissingFields),
    };

    let user = repo
        .get_by_email(email)
        .await?
        .ok_or(AccountError::UnknownUser)?;

    // A stored hash that fails to parse denies access the same as a mismatch
    verify_password(password, &user.password).map_err(|_| AccountError::InvalidCredentials)?;

    let token = tokens
        .issue_session(user.id)
        .map_err(|e| AccountError::Token(e.to_string()))?;

    info!(user_id = user.id, "user logged in");
    Ok((user, token))
}

/// Change the password of an authenticated user.
pub async fn change_password(
    repo: &UserRepository<'_>,
    user_id: i64,
    password: Option<String>,
    password_confirmation: Option<String>,
) -> Result<(), AccountError> {
    let (password, confirmation) = match (present(&password), present(&password_confirmation)) {
        (Some(p), Some(c)) => (p, c),
        _ => return Err(AccountError::MissingFields),
    };

    if password != confirmation {
        return Err(AccountError::PasswordMismatch);
    }

    let password_hash =
        hash_password(password).map_err(|e| AccountError::Password(e.to_string()))?;

    let updated = repo.update_password(user_id, &password_hash).await?;
    if !updated {
        return Err(AccountError::UnknownUser);
    }

    info!(user_id, "password changed");
    Ok(())
}

/// Issue a reset token for the account behind `email` and dispatch the
/// reset link by mail.
///
/// Delivery failure surfaces as an error; it never silently succeeds.
pub async fn request_password_reset(
    repo: &UserRepository<'_>,
    tokens: &TokenService,
    mailer: Arc<dyn Mailer>,
    public_url: &str,
    email: Option<String>,
) -> Result<(), AccountError> {
    let email = present(&email).ok_or(AccountError::MissingFields)?;

    let user = repo
        .get_by_email(email)
        .await?
        .ok_or(AccountError::UnknownUser)?;

    let token = tokens
        .issue_reset(user.id)
        .map_err(|e| AccountError::Token(e.to_string()))?;

    let link = format!(
        "{}/api/user/reset/{}/{}",
        public_url.trim_end_matches('/'),
        user.id,
        token
    );
    let body = reset_email_body(&user.name, &link);

    // lettre's SMTP transport is blocking
    let to = user.email.clone();
    let send = tokio::task::spawn_blocking(move || mailer.send(&to, RESET_EMAIL_SUBJECT, &body))
        .await
        .map_err(|e| AccountError::Mail(e.to_string()))?;
    send.map_err(|e| AccountError::Mail(e.to_string()))?;

    info!(user_id = user.id, "password reset email requested");
    Ok(())
}

/// Verify a reset token for the user named in the URL.
///
/// The user lookup comes first: an unknown id fails before any secret is
/// derived from it.
pub async fn check_reset_token(
    repo: &UserRepository<'_>,
    tokens: &TokenService,
    user_id: i64,
    token: &str,
) -> Result<User, AccountError> {
    let user = repo
        .get_by_id(user_id)
        .await?
        .ok_or(AccountError::UnknownUser)?;

    tokens
        .verify_reset(token, user.id)
        .map_err(|_| AccountError::InvalidToken)?;

    Ok(user)
}

/// Complete a password reset: verify the token, then persist the new
/// password.
pub async fn reset_password(
    repo: &UserRepository<'_>,
    tokens: &TokenService,
    user_id: i64,
    token: &str,
    password: Option<String>,
    password_confirmation: Option<String>,
) -> Result<(), AccountError> {
    let user = check_reset_token(repo, tokens, user_id, token).await?;

    let (password, confirmation) = match (present(&password), present(&password_confirmation)) {
        (Some(p), Some(c)) => (p, c),
        _ => return Err(AccountError::MissingFields),
    };

    if password != confirmation {
        return Err(AccountError::PasswordMismatch);
    }

    let password_hash =
        hash_password(password).map_err(|e| AccountError::Password(e.to_string()))?;

    repo.update_password(user.id, &password_hash).await?;

    info!(user_id = user.id, "password reset completed");
    Ok(())
}
