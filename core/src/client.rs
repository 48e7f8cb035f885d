//! Request primitive for the bookmarkd API.
//!
//! # Design
//! `ApiClient` keeps the host-does-IO split: `build_request` produces an
//! `HttpRequest`, a `Transport` executes it, and `parse_response` turns the
//! raw response into a `Payload` or an `ApiError`. `request` chains the
//! three and logs every failure before returning it. The endpoint wrappers
//! in `endpoints` only shape requests; all status and body handling happens
//! here.
//!
//! One client runs one request at a time. Concurrent callers queue on an
//! internal lock, so overlapping actions against the same resource (a quick
//! like then unlike) reach the server one after another and the last one to
//! complete decides the final state. A queued call reads the token when it
//! takes the lock, not when it was issued.

use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

#[cfg(feature = "ureq")]
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
#[cfg(feature = "ureq")]
use crate::session::FileStore;
use crate::session::Session;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Per-call settings for `ApiClient::request`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    /// Already-serialized body, sent verbatim.
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(HttpMethod::Post)
    }

    pub fn put() -> Self {
        Self::with_method(HttpMethod::Put)
    }

    pub fn patch() -> Self {
        Self::with_method(HttpMethod::Patch)
    }

    pub fn delete() -> Self {
        Self::with_method(HttpMethod::Delete)
    }

    fn with_method(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Serialize `payload` as the JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.body = Some(body);
        Ok(self)
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Normalized body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 204 No Content.
    Empty,
    Json(serde_json::Value),
    Text(String),
}

/// Client for the bookmarkd REST API.
pub struct ApiClient {
    base_url: String,
    session: Session,
    transport: Arc<dyn Transport>,
    in_flight: Mutex<()>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            transport,
            in_flight: Mutex::new(()),
        }
    }

    /// Client persisting its session to `config.state_file` and talking
    /// over `UreqTransport`.
    #[cfg(feature = "ureq")]
    pub fn from_config(config: &ClientConfig) -> Self {
        let session = Session::new(Arc::new(FileStore::new(&config.state_file)));
        Self::new(&config.base_url, session, Arc::new(crate::http::UreqTransport::new()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build the request for `endpoint` with the current credential applied.
    ///
    /// Headers are merged as `Content-Type: application/json`, then the
    /// caller's headers (replacing by name, case-insensitively), then
    /// `Authorization: Bearer <token>` when a token is stored. Without a
    /// token no `Authorization` header is sent at all.
    pub fn build_request(&self, endpoint: &str, options: RequestOptions) -> HttpRequest {
        let token = match self.session.token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "could not read session token; sending unauthenticated");
                None
            }
        };

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        for (name, value) in options.headers {
            set_header(&mut headers, name, value);
        }
        headers.retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
        if let Some(token) = &token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        HttpRequest {
            method: options.method,
            url: format!("{}{endpoint}", self.base_url),
            headers,
            body: options.body,
        }
    }

    /// Normalize a raw response.
    ///
    /// - 204 is `Payload::Empty` whatever the body holds.
    /// - A JSON content type yields `Payload::Json` on success; on failure the
    ///   message comes from the body's `message`, then `error` field, then
    ///   `"Request failed with status <code>"`.
    /// - Any other content type yields `Payload::Text` on success and uses the
    ///   raw body as the failure message.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Payload> {
        if response.status == 204 {
            return Ok(Payload::Empty);
        }

        let is_json = response.is_json();
        if response.is_success() {
            if is_json {
                return serde_json::from_str(&response.body)
                    .map(Payload::Json)
                    .map_err(|e| ApiError::Decode(e.to_string()));
            }
            return Ok(Payload::Text(response.body));
        }

        let message = if is_json {
            serde_json::from_str::<serde_json::Value>(&response.body)
                .ok()
                .and_then(|body| error_field(&body, "message").or_else(|| error_field(&body, "error")))
                .unwrap_or_else(|| generic_failure(response.status))
        } else {
            response.body
        };
        Err(ApiError::Server {
            status: response.status,
            message,
        })
    }

    /// Build, execute and parse one request.
    ///
    /// The request is built only once this call holds the in-flight lock, so
    /// a call queued behind a login sends the token stored when it goes out.
    pub fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Payload> {
        let (method, result) = {
            let _turn = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            let request = self.build_request(endpoint, options);
            tracing::debug!(
                method = %request.method,
                url = %request.url,
                authenticated = request.header("authorization").is_some(),
                "sending request"
            );
            let result = self
                .transport
                .execute(&request)
                .and_then(|response| self.parse_response(response));
            (request.method, result)
        };

        if let Err(e) = &result {
            tracing::error!(%method, endpoint, error = %e, "API error");
        }
        result
    }

    /// `request`, then decode the JSON payload into `T`.
    pub fn request_json<T: DeserializeOwned>(&self, endpoint: &str, options: RequestOptions) -> Result<T> {
        let decoded = match self.request(endpoint, options)? {
            Payload::Json(value) => serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string())),
            Payload::Empty => Err(ApiError::Decode("expected a JSON body, got no content".to_string())),
            Payload::Text(_) => Err(ApiError::Decode("expected a JSON body, got text".to_string())),
        };
        if let Err(e) = &decoded {
            tracing::error!(endpoint, error = %e, "API error");
        }
        decoded
    }

    /// `request`, discarding whatever successful payload comes back.
    pub fn request_unit(&self, endpoint: &str, options: RequestOptions) -> Result<()> {
        self.request(endpoint, options).map(|_| ())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: String, value: String) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
        Some(existing) => existing.1 = value,
        None => headers.push((name, value)),
    }
}

/// Non-empty string field of an error body.
fn error_field(body: &serde_json::Value, field: &str) -> Option<String> {
    body.get(field)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn generic_failure(status: u16) -> String {
    format!("Request failed with status {status}")
}
