use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::body;
use crate::auth::{AuthUser, MaybeUser};
use crate::error::{Failure, Reply};
use crate::models::{BookRatingStats, Comment, CreateComment, CreateRating, Rating, UpdateRating};
use crate::store::{check_score, validate_status, RatingOrder};
use crate::AppState;

const DEFAULT_STATUS: &str = "finished_reading";

#[derive(Deserialize)]
pub struct SortParams {
    sort_by: Option<String>,
}

/// `GET /books/{id}/ratings[?sort_by=newest|most_liked|highest_rating]`
pub async fn for_book(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(book_id): Path<i64>,
    Query(params): Query<SortParams>,
) -> Reply<Json<BookRatingStats>> {
    let order = RatingOrder::parse(params.sort_by.as_deref())?;
    state.db.read().await.book_ratings(book_id, viewer.id(), order).map(Json)
}

/// `POST /books/{id}/ratings`: one rating per user and book, re-posting overwrites.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(book_id): Path<i64>,
    payload: Result<Json<CreateRating>, JsonRejection>,
) -> Reply<(StatusCode, Json<Rating>)> {
    let input = body(payload)?;
    let status = input.status.as_deref().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_STATUS);
    validate_status(status)?;
    check_score(input.rating, status)?;
    let rating = state
        .db
        .write()
        .await
        .upsert_rating(claims.user_id, book_id, input.rating, &input.review, status)?;
    Ok((StatusCode::CREATED, Json(rating)))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(rating_id): Path<i64>,
    payload: Result<Json<UpdateRating>, JsonRejection>,
) -> Reply<Json<Rating>> {
    let input = body(payload)?;
    let mut db = state.db.write().await;
    db.update_rating(claims.user_id, rating_id, input.rating, &input.review).map(Json)
}

pub async fn remove(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(book_id): Path<i64>,
) -> Reply<StatusCode> {
    state.db.write().await.delete_rating(claims.user_id, book_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mine_for_book(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(book_id): Path<i64>,
) -> Reply<Json<Rating>> {
    state.db.read().await.rating_for(claims.user_id, book_id).map(Json)
}

#[derive(Deserialize)]
pub struct StatusParams {
    status: Option<String>,
}

/// `GET /users/me/ratings[?status=...]`
pub async fn mine(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(params): Query<StatusParams>,
) -> Reply<Json<Vec<Rating>>> {
    let status = params.status.as_deref().filter(|s| !s.is_empty());
    if let Some(status) = status {
        validate_status(status)?;
    }
    Ok(Json(state.db.read().await.user_ratings(claims.user_id, status)))
}

pub async fn like(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(rating_id): Path<i64>,
) -> Reply<StatusCode> {
    state.db.write().await.like(claims.user_id, rating_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unlike(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(rating_id): Path<i64>,
) -> Reply<StatusCode> {
    state.db.write().await.unlike(claims.user_id, rating_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn comments(State(state): State<AppState>, Path(rating_id): Path<i64>) -> Reply<Json<Vec<Comment>>> {
    state.db.read().await.comments(rating_id).map(Json)
}

pub async fn comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(rating_id): Path<i64>,
    payload: Result<Json<CreateComment>, JsonRejection>,
) -> Reply<(StatusCode, Json<Comment>)> {
    let input = body(payload)?;
    let text = input.text.trim();
    if text.is_empty() {
        return Err(Failure::invalid("Comment text is required"));
    }
    let comment = state.db.write().await.add_comment(claims.user_id, rating_id, text)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(comment_id): Path<i64>,
) -> Reply<StatusCode> {
    state.db.write().await.delete_comment(claims.user_id, comment_id)?;
    Ok(StatusCode::NO_CONTENT)
}
