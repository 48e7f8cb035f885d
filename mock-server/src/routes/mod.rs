//! Route table and request-body helpers.

mod accounts;
mod books;
mod embed;
mod feed;
mod lists;
mod ratings;
mod users;

use axum::extract::rejection::JsonRejection;
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::{Failure, Reply};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(accounts::signup))
        .route("/auth/login", post(accounts::login))
        .route("/profile", get(accounts::profile))
        .route("/genres", get(books::genres))
        .route("/books", get(books::list))
        .route("/books/trending", get(books::trending))
        .route("/books/popular", get(books::popular))
        .route("/books/{id}", get(books::show))
        .route("/books/{id}/similar", get(books::similar))
        .route(
            "/books/{id}/ratings",
            get(ratings::for_book).post(ratings::create).delete(ratings::remove),
        )
        .route("/books/{id}/ratings/me", get(ratings::mine_for_book))
        .route("/ratings/{id}", patch(ratings::update))
        .route("/ratings/{id}/like", post(ratings::like).delete(ratings::unlike))
        .route("/ratings/{id}/comments", get(ratings::comments).post(ratings::comment))
        .route("/comments/{id}", delete(ratings::delete_comment))
        .route("/users/me/ratings", get(ratings::mine))
        .route("/users/me/bookmarked-lists", get(lists::bookmarked))
        .route("/users/{id}/profile", get(users::profile))
        .route("/users/{id}/follow", post(users::follow).delete(users::unfollow))
        .route("/users/{id}/followers", get(users::followers))
        .route("/users/{id}/following", get(users::following))
        .route("/users/{id}/stats/year/{year}", get(users::year_stats))
        .route("/users/{id}/lists", get(lists::for_user))
        .route("/feed", get(feed::feed))
        .route("/lists", post(lists::create))
        .route("/lists/popular", get(lists::popular))
        .route("/lists/{id}", get(lists::show).put(lists::update).delete(lists::remove))
        .route("/lists/{id}/books", post(lists::add_book).put(lists::reorder))
        .route("/lists/{id}/books/{book_id}", delete(lists::remove_book))
        .route("/lists/{id}/bookmark", post(lists::bookmark).delete(lists::unbookmark))
        .route("/embed/users/{id}/books", get(embed::user_books))
        .route("/embed/lists/{id}", get(embed::list))
}

/// Unwrap a JSON body, answering malformed input with a plain 400.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Reply<T> {
    payload.map(|Json(value)| value).map_err(|e| {
        tracing::debug!(error = %e, "rejected request body");
        Failure::bad_request("Invalid request body")
    })
}

#[derive(Deserialize)]
struct LimitParams {
    limit: Option<usize>,
}

impl LimitParams {
    fn limit_or(&self, default: usize) -> usize {
        self.limit.filter(|&l| l > 0).unwrap_or(default)
    }
}
