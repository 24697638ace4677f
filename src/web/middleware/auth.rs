//! Session cookie authentication middleware.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{SessionClaims, TokenService};
use crate::web::error::ApiError;

/// Name of the session cookie set on register and login.
pub const SESSION_COOKIE: &str = "token";

/// Extractor for authenticated users.
///
/// Use this extractor to require authentication for a handler.
/// The handler will receive the session claims if the cookie holds a
/// valid token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub SessionClaims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let jar = CookieJar::from_headers(&parts.headers);
            let token = jar
                .get(SESSION_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .ok_or_else(|| ApiError::unauthorized("Token not found"))?;

            // Token service is injected into extensions by middleware
            let tokens = parts
                .extensions
                .get::<Arc<TokenService>>()
                .ok_or_else(|| ApiError::internal("Token service not configured"))?;

            let claims = tokens.verify_session(&token).map_err(|e| {
                tracing::debug!("session verification failed: {}", e);
                ApiError::unauthorized("Invalid Token")
            })?;

            Ok(AuthUser(claims))
        })
    }
}

/// Middleware function to inject the token service into request extensions.
pub async fn session_auth(
    tokens: Arc<TokenService>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(tokens);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_name() {
        assert_eq!(SESSION_COOKIE, "token");
    }

    #[test]
    fn test_session_claims_roundtrip() {
        let tokens = TokenService::new("session-secret", "reset-secret", 5, 15);
        let token = tokens.issue_session(42).unwrap();
        let claims = tokens.verify_session(&token).unwrap();
        assert_eq!(claims.sub, 42);
    }
}
