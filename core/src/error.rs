//! Error types for the bookmarkd API client.
//!
//! # Design
//! Every failure reaches the caller as one `ApiError` carrying a message.
//! `Server` keeps the HTTP status next to the extracted message, and its
//! `Display` is the message alone so callers can show it to a user
//! verbatim. Malformed session tokens never produce an error; the identity
//! helper reports absence instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `ApiClient` and the session stores.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or no response arrived.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A successful response did not match the endpoint's schema.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The operation needs the signed-in user's id and none is available.
    #[error("not logged in")]
    NotAuthenticated,

    /// The local key-value store could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ApiError {
    /// HTTP status for server-reported failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the credential (401).
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_message_only() {
        let err = ApiError::Server {
            status: 409,
            message: "Email already exists".to_string(),
        };
        assert_eq!(err.to_string(), "Email already exists");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn network_error_keeps_underlying_message() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn unauthorized_detection() {
        let err = ApiError::Server {
            status: 401,
            message: "Invalid or expired token".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!ApiError::NotAuthenticated.is_unauthorized());
    }
}
