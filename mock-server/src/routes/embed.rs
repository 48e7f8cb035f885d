//! Read-only endpoints behind the embeddable reading widget. No token needed.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::Reply;
use crate::models::{EmbedList, EmbedUserBooks};
use crate::store::embed_count;
use crate::AppState;

#[derive(Deserialize)]
pub struct CountParams {
    count: Option<String>,
}

impl CountParams {
    /// Unparseable or out-of-range counts fall back to the default.
    fn count(&self) -> usize {
        embed_count(self.count.as_deref().and_then(|c| c.parse().ok()))
    }
}

/// `GET /embed/users/{id}/books?count=`
pub async fn user_books(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(params): Query<CountParams>,
) -> Reply<Json<EmbedUserBooks>> {
    state.db.read().await.embed_user_books(user_id, params.count()).map(Json)
}

/// `GET /embed/lists/{id}?count=`
pub async fn list(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Query(params): Query<CountParams>,
) -> Reply<Json<EmbedList>> {
    state.db.read().await.embed_list(list_id, params.count()).map(Json)
}
