use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::{body, LimitParams};
use crate::auth::{AuthUser, MaybeUser};
use crate::error::{Failure, Reply};
use crate::models::{BookPosition, List, ListInput, ListWithBooks, ReorderBooks};
use crate::AppState;

const POPULAR_LIMIT: usize = 10;

fn list_input(payload: Result<Json<ListInput>, JsonRejection>) -> Reply<ListInput> {
    let mut input = body(payload)?;
    input.name = input.name.trim().to_string();
    if input.name.is_empty() {
        return Err(Failure::invalid("List name is required"));
    }
    Ok(input)
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    payload: Result<Json<ListInput>, JsonRejection>,
) -> Reply<(StatusCode, Json<List>)> {
    let input = list_input(payload)?;
    let list = state.db.write().await.create_list(claims.user_id, &input);
    Ok((StatusCode::CREATED, Json(list)))
}

pub async fn show(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(list_id): Path<i64>,
) -> Reply<Json<ListWithBooks>> {
    state.db.read().await.list_with_books(list_id, viewer.id()).map(Json)
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(list_id): Path<i64>,
    payload: Result<Json<ListInput>, JsonRejection>,
) -> Reply<Json<List>> {
    let input = list_input(payload)?;
    state.db.write().await.update_list(claims.user_id, list_id, &input).map(Json)
}

pub async fn remove(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(list_id): Path<i64>,
) -> Reply<StatusCode> {
    state.db.write().await.delete_list(claims.user_id, list_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn for_user(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(user_id): Path<i64>,
) -> Json<Vec<List>> {
    Json(state.db.read().await.user_lists(user_id, viewer.id()))
}

pub async fn add_book(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(list_id): Path<i64>,
    payload: Result<Json<BookPosition>, JsonRejection>,
) -> Reply<StatusCode> {
    let slot = body(payload)?;
    let mut db = state.db.write().await;
    db.add_book(claims.user_id, list_id, slot.book_id, slot.position)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_book(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path((list_id, book_id)): Path<(i64, i64)>,
) -> Reply<StatusCode> {
    state.db.write().await.remove_book(claims.user_id, list_id, book_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reorder(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(list_id): Path<i64>,
    payload: Result<Json<ReorderBooks>, JsonRejection>,
) -> Reply<StatusCode> {
    let input = body(payload)?;
    state.db.write().await.reorder(claims.user_id, list_id, &input.books)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn bookmark(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(list_id): Path<i64>,
) -> Reply<StatusCode> {
    state.db.write().await.bookmark(claims.user_id, list_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unbookmark(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(list_id): Path<i64>,
) -> Reply<StatusCode> {
    state.db.write().await.unbookmark(claims.user_id, list_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn bookmarked(State(state): State<AppState>, AuthUser(claims): AuthUser) -> Json<Vec<List>> {
    Json(state.db.read().await.bookmarked_lists(claims.user_id))
}

pub async fn popular(State(state): State<AppState>, Query(params): Query<LimitParams>) -> Json<Vec<List>> {
    Json(state.db.read().await.popular_lists(params.limit_or(POPULAR_LIMIT)))
}
