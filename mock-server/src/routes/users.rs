use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::auth::{AuthUser, MaybeUser};
use crate::error::Reply;
use crate::models::{User, UserProfile, UserYearStats};
use crate::AppState;

pub async fn profile(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(user_id): Path<i64>,
) -> Reply<Json<UserProfile>> {
    state.db.read().await.profile(user_id, viewer.id()).map(Json)
}

pub async fn follow(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(user_id): Path<i64>,
) -> Reply<StatusCode> {
    state.db.write().await.follow(claims.user_id, user_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unfollow(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(user_id): Path<i64>,
) -> Reply<StatusCode> {
    state.db.write().await.unfollow(claims.user_id, user_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn followers(State(state): State<AppState>, Path(user_id): Path<i64>) -> Reply<Json<Vec<User>>> {
    state.db.read().await.followers(user_id).map(Json)
}

pub async fn following(State(state): State<AppState>, Path(user_id): Path<i64>) -> Reply<Json<Vec<User>>> {
    state.db.read().await.following(user_id).map(Json)
}

pub async fn year_stats(
    State(state): State<AppState>,
    Path((user_id, year)): Path<(i64, i32)>,
) -> Reply<Json<UserYearStats>> {
    state.db.read().await.year_stats(user_id, year).map(Json)
}
