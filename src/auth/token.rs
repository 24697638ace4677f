//! Session and password-reset token service.
//!
//! Both token kinds are HS256 JWTs. Session tokens are signed with a single
//! process-wide secret and live for days; reset tokens are signed with a
//! per-user derived secret (base secret + user id) and live for minutes, so
//! one user's reset token can never verify against another user's secret.
//! The two base secrets are configured independently so they can be rotated
//! without invalidating each other.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token-related errors.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Signature invalid, expired, or wrong subject. Fails closed.
    #[error("invalid or expired token")]
    Invalid,

    /// Signing failed.
    #[error("token signing failed: {0}")]
    Sign(String),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID).
    pub sub: i64,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
    /// JWT ID (unique identifier).
    pub jti: String,
}

/// Claims carried by a password-reset token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetClaims {
    /// Subject (user ID).
    pub sub: i64,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
}

/// Issues and verifies session and password-reset tokens.
pub struct TokenService {
    session_encoding: EncodingKey,
    session_decoding: DecodingKey,
    reset_secret: String,
    session_ttl_secs: i64,
    reset_ttl_secs: i64,
}

impl TokenService {
    /// Create a token service from the configured secrets and lifetimes.
    pub fn new(
        session_secret: &str,
        reset_secret: &str,
        session_ttl_days: i64,
        reset_ttl_mins: i64,
    ) -> Self {
        Self {
            session_encoding: EncodingKey::from_secret(session_secret.as_bytes()),
            session_decoding: DecodingKey::from_secret(session_secret.as_bytes()),
            reset_secret: reset_secret.to_string(),
            session_ttl_secs: session_ttl_days * 24 * 60 * 60,
            reset_ttl_secs: reset_ttl_mins * 60,
        }
    }

    /// Session token lifetime in seconds.
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl_secs
    }

    /// Strict validation settings: expiry enforced, no clock leeway.
    fn validation() -> Validation {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;
        validation
    }

    /// Issue a session token for a user.
    pub fn issue_session(&self, user_id: i64) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id,
            iat: now as u64,
            exp: (now + self.session_ttl_secs) as u64,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.session_encoding)
            .map_err(|e| TokenError::Sign(e.to_string()))
    }

    /// Verify a session token and return its claims.
    pub fn verify_session(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let data = decode::<SessionClaims>(token, &self.session_decoding, &Self::validation())
            .map_err(|e| {
                tracing::debug!("session token validation failed: {}", e);
                TokenError::Invalid
            })?;
        Ok(data.claims)
    }

    /// Derive the per-user reset signing secret: base secret + user id.
    fn reset_secret_for(&self, user_id: i64) -> String {
        format!("{}{}", self.reset_secret, user_id)
    }

    /// Issue a password-reset token for a user, signed with the per-user
    /// derived secret.
    pub fn issue_reset(&self, user_id: i64) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = ResetClaims {
            sub: user_id,
            iat: now as u64,
            exp: (now + self.reset_ttl_secs) as u64,
        };

        let key = EncodingKey::from_secret(self.reset_secret_for(user_id).as_bytes());
        encode(&Header::default(), &claims, &key).map_err(|e| TokenError::Sign(e.to_string()))
    }

    /// Verify a password-reset token against the expected user.
    ///
    /// The per-user secret is derived from `expected_user_id`, so a token
    /// issued for another user fails the signature check even before the
    /// subject comparison.
    pub fn verify_reset(&self, token: &str, expected_user_id: i64) -> Result<(), TokenError> {
        let key = DecodingKey::from_secret(self.reset_secret_for(expected_user_id).as_bytes());
        let data = decode::<ResetClaims>(token, &key, &Self::validation()).map_err(|e| {
            tracing::debug!("reset token validation failed: {}", e);
            TokenError::Invalid
        })?;

        if data.claims.sub != expected_user_id {
            return Err(TokenError::Invalid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("session-secret", "reset-secret", 5, 15)
    }

    #[test]
    fn test_session_roundtrip() {
        let tokens = service();
        let token = tokens.issue_session(42).unwrap();

        let claims = tokens.verify_session(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 5 * 24 * 60 * 60);
    }

    #[test]
    fn test_session_unique_jti() {
        let tokens = service();
        let t1 = tokens.issue_session(1).unwrap();
        let t2 = tokens.issue_session(1).unwrap();
        // jti differs even for the same user at the same instant
        assert_ne!(t1, t2);
    }

    #[test]
    fn test_session_wrong_secret_rejected() {
        let tokens = service();
        let other = TokenService::new("different-secret", "reset-secret", 5, 15);

        let token = tokens.issue_session(42).unwrap();
        assert!(matches!(
            other.verify_session(&token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_session_expired_rejected() {
        let tokens = service();
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: 42,
            iat: (now - 7200) as u64,
            exp: (now - 3600) as u64, // expired one hour ago
            jti: uuid::Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("session-secret".as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            tokens.verify_session(&token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_session_garbage_rejected() {
        let tokens = service();
        assert!(tokens.verify_session("garbage").is_err());
        assert!(tokens.verify_session("").is_err());
    }

    #[test]
    fn test_reset_roundtrip() {
        let tokens = service();
        let token = tokens.issue_reset(7).unwrap();
        assert!(tokens.verify_reset(&token, 7).is_ok());
    }

    #[test]
    fn test_reset_window_is_minutes() {
        let tokens = service();
        let token = tokens.issue_reset(7).unwrap();

        let key = DecodingKey::from_secret("reset-secret7".as_bytes());
        let data = decode::<ResetClaims>(&token, &key, &TokenService::validation()).unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 15 * 60);
    }

    #[test]
    fn test_reset_rejected_for_other_user() {
        let tokens = service();
        // Token issued for user 7 must not verify against user 8's secret
        let token = tokens.issue_reset(7).unwrap();
        assert!(matches!(
            tokens.verify_reset(&token, 8),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_reset_expired_rejected() {
        let tokens = service();
        let now = Utc::now().timestamp();
        let claims = ResetClaims {
            sub: 7,
            iat: (now - 3600) as u64,
            exp: (now - 60) as u64,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("reset-secret7".as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            tokens.verify_reset(&token, 7),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_reset_forged_subject_rejected() {
        let tokens = service();
        // Well-formed token signed with user 8's derived secret but carrying
        // user 7 as the subject
        let now = Utc::now().timestamp();
        let claims = ResetClaims {
            sub: 7,
            iat: now as u64,
            exp: (now + 900) as u64,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("reset-secret8".as_bytes()),
        )
        .unwrap();

        assert!(tokens.verify_reset(&token, 8).is_err());
    }

    #[test]
    fn test_session_and_reset_tokens_not_interchangeable() {
        let tokens = service();
        let session = tokens.issue_session(7).unwrap();
        let reset = tokens.issue_reset(7).unwrap();

        assert!(tokens.verify_reset(&session, 7).is_err());
        assert!(tokens.verify_session(&reset).is_err());
    }
}
