//! Error types for session server operations

use thiserror::Error;

/// Errors that can occur while talking to the session server
#[derive(Error, Debug)]
pub enum SessionError {
    /// HTTP client construction failed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// The request could not be sent or the connection failed
    #[error("Request to {endpoint} failed ({kind}): {message}")]
    Request {
        endpoint: String,
        kind: &'static str,
        message: String,
    },

    /// The server answered with a non-success status
    #[error("{endpoint} returned error {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded
    #[error("Failed to parse response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl SessionError {
    /// Classify a transport error from reqwest
    pub(crate) fn from_reqwest(endpoint: &str, e: &reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            "timeout"
        } else if e.is_connect() {
            "connection"
        } else if e.is_request() {
            "request build"
        } else if e.is_body() {
            "body"
        } else {
            "unknown"
        };
        Self::Request {
            endpoint: endpoint.to_string(),
            kind,
            message: e.to_string(),
        }
    }
}

impl From<SessionError> for docsync_core::error::Error {
    fn from(err: SessionError) -> Self {
        docsync_core::error::Error::Session(err.to_string())
    }
}
