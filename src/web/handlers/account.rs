//! Account handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::account::{self, RegisterData};
use crate::auth::TokenService;
use crate::db::UserRepository;
use crate::mail::Mailer;
use crate::web::dto::{
    ChangePasswordRequest, LoggedUserResponse, LoginRequest, RegisterRequest,
    ResetPasswordRequest, SendResetEmailRequest, StatusResponse,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, SESSION_COOKIE};
use crate::Database;

/// Shared database handle for the web API.
pub type SharedDatabase = Arc<Database>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: SharedDatabase,
    /// Session and reset token service.
    pub tokens: Arc<TokenService>,
    /// Outbound mail transport.
    pub mailer: Arc<dyn Mailer>,
    /// Public base URL used to build reset links.
    pub public_url: String,
    /// Whether the session cookie carries the Secure attribute.
    pub cookie_secure: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        db: SharedDatabase,
        tokens: Arc<TokenService>,
        mailer: Arc<dyn Mailer>,
        public_url: impl Into<String>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            db,
            tokens,
            mailer,
            public_url: public_url.into(),
            cookie_secure,
        }
    }

    /// Build the session cookie holding `token`.
    fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.cookie_secure)
            .path("/")
            .max_age(time::Duration::seconds(self.tokens.session_ttl_secs()))
            .build()
    }
}

/// POST /api/user/register - Create an account and start a session.
pub async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, CookieJar, Json<StatusResponse>), ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let data = RegisterData {
        name: req.name,
        email: req.email,
        password: req.password,
        password_confirmation: req.password_confirmation,
        accepted_terms: req.term_and_condition,
    };

    let (_user, token) = account::register(&repo, &state.tokens, data).await?;

    let jar = jar.add(state.session_cookie(token));
    Ok((
        StatusCode::CREATED,
        jar,
        Json(StatusResponse::success("Registration Success")),
    ))
}

/// POST /api/user/login - Authenticate and start a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<StatusResponse>), ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let (_user, token) = account::login(&repo, &state.tokens, req.email, req.password).await?;

    let jar = jar.add(state.session_cookie(token));
    Ok((jar, Json(StatusResponse::success("Login Success"))))
}

/// GET /api/user/logged-user - Return the authenticated user.
pub async fn logged_user(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<LoggedUserResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = repo
        .get_by_id(claims.sub)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("You are not a Registered User"))?;

    Ok(Json(LoggedUserResponse::new(&user)))
}

/// POST /api/user/change-password - Change the authenticated user's password.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    account::change_password(&repo, claims.sub, req.password, req.password_confirmation).await?;

    Ok(Json(StatusResponse::success("Password Changed Successfully")))
}

/// POST /api/user/send-reset-password-email - Mail a reset link.
pub async fn send_reset_password_email(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendResetEmailRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    account::request_password_reset(
        &repo,
        &state.tokens,
        state.mailer.clone(),
        &state.public_url,
        req.email,
    )
    .await?;

    Ok(Json(StatusResponse::success(
        "Password Reset Email Sent... Please Check Your Email",
    )))
}

/// GET /api/user/reset/:user_id/:token - Check a reset link before use.
pub async fn check_reset_token(
    State(state): State<Arc<AppState>>,
    Path((user_id, token)): Path<(i64, String)>,
) -> Result<Json<LoggedUserResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = account::check_reset_token(&repo, &state.tokens, user_id, &token).await?;

    Ok(Json(LoggedUserResponse::new(&user)))
}

/// POST /api/user/reset/:user_id/:token - Complete a password reset.
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Path((user_id, token)): Path<(i64, String)>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    account::reset_password(
        &repo,
        &state.tokens,
        user_id,
        &token,
        req.password,
        req.password_confirmation,
    )
    .await?;

    Ok(Json(StatusResponse::success("Password Reset Successfully")))
}

/// GET /health - Liveness probe.
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::success("ok"))
}

#[cfg(test)]
mod tests {
    use crate::web::dto::UserInfo;

    #[test]
    fn test_user_info_from_claims_shape() {
        // UserInfo carries only public fields
        let user = crate::db::User {
            id: 1,
            name: "A".into(),
            email: "a@x.com".into(),
            password: "hash".into(),
            accepted_terms: true,
            created_at: "2026-01-01 00:00:00".into(),
        };
        let info = UserInfo::from(&user);
        assert_eq!(info.id, 1);
        assert_eq!(info.email, "a@x.com");
    }
}
