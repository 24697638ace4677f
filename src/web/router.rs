//! Router configuration for the doorkeep web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::account::{
    change_password, check_reset_token, health, logged_user, login, register, reset_password,
    send_reset_password_email,
};
use super::handlers::AppState;
use super::middleware::{create_cors_layer, session_auth};

/// Create the main API router.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    // Account routes (no authentication required)
    let user_public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/send-reset-password-email", post(send_reset_password_email))
        .route(
            "/reset/:user_id/:token",
            get(check_reset_token).post(reset_password),
        );

    // Account routes (authentication required)
    let user_protected_routes = Router::new()
        .route("/change-password", post(change_password))
        .route("/logged-user", get(logged_user));

    let user_routes = Router::new()
        .merge(user_public_routes)
        .merge(user_protected_routes);

    let api_routes = Router::new().nest("/user", user_routes);

    // Clone the token service for the middleware closure
    let tokens_for_middleware = app_state.tokens.clone();

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let tokens = tokens_for_middleware.clone();
                    session_auth(tokens, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}
