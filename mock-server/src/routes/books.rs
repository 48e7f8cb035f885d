use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::LimitParams;
use crate::error::{Failure, Reply};
use crate::models::{Book, BookSummary, Genre};
use crate::store::DEFAULT_PAGE;
use crate::AppState;

const DISCOVERY_LIMIT: usize = 10;
const SIMILAR_LIMIT: usize = 6;

#[derive(Deserialize)]
pub struct BookParams {
    search: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

pub async fn list(State(state): State<AppState>, Query(params): Query<BookParams>) -> Json<Vec<Book>> {
    let limit = params.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_PAGE);
    let db = state.db.read().await;
    Json(db.books(params.search.as_deref(), limit, params.offset.unwrap_or(0)))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Reply<Json<Book>> {
    let db = state.db.read().await;
    db.book(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Failure::not_found("Book not found"))
}

pub async fn trending(State(state): State<AppState>, Query(params): Query<LimitParams>) -> Json<Vec<BookSummary>> {
    Json(state.db.read().await.trending(params.limit_or(DISCOVERY_LIMIT)))
}

pub async fn popular(State(state): State<AppState>, Query(params): Query<LimitParams>) -> Json<Vec<BookSummary>> {
    Json(state.db.read().await.popular(params.limit_or(DISCOVERY_LIMIT)))
}

pub async fn similar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<LimitParams>,
) -> Reply<Json<Vec<BookSummary>>> {
    state.db.read().await.similar(id, params.limit_or(SIMILAR_LIMIT)).map(Json)
}

pub async fn genres(State(state): State<AppState>) -> Json<Vec<Genre>> {
    Json(state.db.read().await.genres())
}
