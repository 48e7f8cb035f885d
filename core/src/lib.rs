//! Client core for the bookmarkd book-rating service.
//!
//! # Overview
//! Everything a front end needs to talk to the bookmarkd REST API: a single
//! request primitive that normalizes success and error responses, one typed
//! wrapper per backend endpoint, and the session (bearer token, decoded user
//! id, theme preference) those wrappers depend on.
//!
//! # Design
//! - `ApiClient` splits each call into `build_request` / `Transport::execute`
//!   / `parse_response`, so request shaping and response handling are
//!   testable without a network.
//! - The credential source is injected as a `KeyValueStore`; the token is
//!   read on every call, never cached.
//! - Responses are parsed into the records in `types` at the boundary. A body
//!   that does not fit is a `Decode` error, not a half-filled struct.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod session;
pub mod types;

pub use client::{ApiClient, Payload, RequestOptions, DEFAULT_BASE_URL};
pub use config::ClientConfig;
pub use endpoints::{positions_in_order, DEFAULT_EMBED_COUNT, DEFAULT_FEED_LIMIT};
pub use error::{ApiError, Result};
#[cfg(feature = "ureq")]
pub use http::UreqTransport;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use session::{decode_user_id, FileStore, KeyValueStore, MemoryStore, Navigation, Session, Theme};
pub use types::*;
