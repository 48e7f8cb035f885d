//! Bearer-token authentication: HS256 JWTs and the request extractors built on them.

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken as jwt;
use serde::{Deserialize, Serialize};

use crate::error::Failure;
use crate::models::User;
use crate::AppState;

const TOKEN_TTL_HOURS: i64 = 24 * 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub username: String,
    pub exp: i64,
}

pub fn issue_token(user: &User, secret: &[u8]) -> Result<String, jwt::errors::Error> {
    let claims = Claims {
        user_id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };
    jwt::encode(
        &jwt::Header::new(jwt::Algorithm::HS256),
        &claims,
        &jwt::EncodingKey::from_secret(secret),
    )
}

pub fn validate_token(token: &str, secret: &[u8]) -> Result<Claims, jwt::errors::Error> {
    let validation = jwt::Validation::new(jwt::Algorithm::HS256);
    jwt::decode::<Claims>(token, &jwt::DecodingKey::from_secret(secret), &validation).map(|data| data.claims)
}

fn authenticate(parts: &Parts, secret: &[u8]) -> Result<Claims, Failure> {
    let value = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if value.is_empty() {
        return Err(Failure::unauthorized("Authorization header required"));
    }
    let Some(token) = value.strip_prefix("Bearer ").filter(|t| !t.is_empty()) else {
        return Err(Failure::unauthorized("Invalid authorization header format"));
    };
    validate_token(token, secret).map_err(|e| {
        tracing::debug!(error = %e, "token rejected");
        Failure::unauthorized("Invalid or expired token")
    })
}

/// Caller identity taken from a valid bearer token. Rejects with 401 otherwise.
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Failure;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        authenticate(parts, &app_state.secret).map(Self)
    }
}

/// Like [`AuthUser`] but for routes that also serve anonymous callers.
pub struct MaybeUser(pub Option<Claims>);

impl MaybeUser {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|c| c.user_id)
    }
}

impl<S> FromRequestParts<S> for MaybeUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(Self(authenticate(parts, &app_state.secret).ok()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: 42,
            email: "ann@example.com".to_string(),
            username: "ann".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_token_validates() {
        let token = issue_token(&user(), b"secret").unwrap();
        assert_eq!(token.split('.').count(), 3);
        let claims = validate_token(&token, b"secret").unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "ann");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(&user(), b"secret").unwrap();
        assert!(validate_token(&token, b"other").is_err());
    }
}
