//! In-memory implementation of the bookmarkd REST API.
//!
//! Serves every route the client crate calls, under `/api`, with the same
//! status codes and error body shapes as the production backend: JSON for
//! successes, `text/plain` for most failures, `{"error": ...}` for field
//! validation. State lives in memory and is lost on shutdown.

use std::sync::Arc;

use axum::Router;
use tokio::{net::TcpListener, sync::RwLock};

pub mod auth;
pub mod error;
pub mod models;
mod routes;
pub mod store;

pub use error::Failure;
pub use models::*;
pub use store::Db;

/// Signing key used when none is configured.
pub const DEFAULT_SECRET: &str = "bookmarkd-dev-secret";

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<RwLock<Db>>,
    pub secret: Arc<[u8]>,
}

impl AppState {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            db: Arc::new(RwLock::new(Db::seeded())),
            secret: Arc::from(secret),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_SECRET.as_bytes())
    }
}

/// Router over a freshly seeded store.
pub fn app() -> Router {
    app_with(AppState::default())
}

pub fn app_with(state: AppState) -> Router {
    Router::new().nest("/api", routes::router()).with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, AppState::default()).await
}

pub async fn run_with(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock api listening");
    }
    axum::serve(listener, app_with(state)).await
}
