use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::body;
use crate::auth::{issue_token, AuthUser};
use crate::error::{Failure, Reply};
use crate::models::{LoginRequest, LoginResponse, SignupRequest, User};
use crate::AppState;

const MIN_PASSWORD_LEN: usize = 8;

/// `POST /auth/signup`. Answers with the bare account; the caller logs in separately.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Reply<(StatusCode, Json<User>)> {
    let input = body(payload)?;
    let username = input.username.trim();
    let email = input.email.trim();
    if username.is_empty() || email.is_empty() || input.password.is_empty() {
        return Err(Failure::invalid("All fields are required"));
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Failure::invalid("Password must be at least 8 characters"));
    }
    let user = state.db.write().await.create_user(username, email, &input.password)?;
    tracing::info!(user_id = user.id, username = %user.username, "account created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Reply<Json<LoginResponse>> {
    let input = body(payload)?;
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(Failure::invalid("Email and password required"));
    }
    let user = state
        .db
        .read()
        .await
        .check_credentials(input.email.trim(), &input.password)
        .ok_or_else(|| Failure::unauthorized("Invalid credentials"))?;
    let token = issue_token(&user, &state.secret).map_err(|e| {
        tracing::error!(error = %e, "token signing failed");
        Failure::text(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    })?;
    tracing::info!(user_id = user.id, "login");
    Ok(Json(LoginResponse { token, user }))
}

/// `GET /profile`: echoes the token's claims.
pub async fn profile(AuthUser(claims): AuthUser) -> Json<Value> {
    Json(json!({
        "message": "Welcome to your profile",
        "user_id": claims.user_id,
        "email": claims.email,
        "username": claims.username,
    }))
}
