use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::auth::MaybeUser;
use crate::models::FeedItem;
use crate::store::DEFAULT_PAGE;
use crate::AppState;

#[derive(Deserialize)]
pub struct FeedParams {
    #[serde(rename = "type")]
    kind: Option<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

/// `GET /feed?type=all|following&limit=&offset=`, newest first.
///
/// The `following` filter only applies to signed-in callers; anyone else
/// gets the global feed.
pub async fn feed(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Query(params): Query<FeedParams>,
) -> Json<Vec<FeedItem>> {
    let following_only = params.kind.as_deref() == Some("following") && viewer.0.is_some();
    let limit = params.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_PAGE);
    let db = state.db.read().await;
    Json(db.feed(viewer.id(), following_only, limit, params.offset.unwrap_or(0)))
}
