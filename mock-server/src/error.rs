//! Error responses in the two shapes the real backend emits.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// `text/plain` body with a trailing newline.
    Text(StatusCode, String),
    /// `{"error": "..."}` body, used for field validation.
    Json(StatusCode, String),
}

impl Failure {
    pub fn text(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Text(status, message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Json(StatusCode::BAD_REQUEST, message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::text(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::text(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden() -> Self {
        Self::text(StatusCode::FORBIDDEN, "Forbidden")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::text(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::text(StatusCode::CONFLICT, message)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Text(status, _) | Self::Json(status, _) => *status,
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        match self {
            Self::Text(status, message) => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("{message}\n"),
            )
                .into_response(),
            Self::Json(status, message) => (status, Json(json!({ "error": message }))).into_response(),
        }
    }
}

pub type Reply<T> = Result<T, Failure>;
