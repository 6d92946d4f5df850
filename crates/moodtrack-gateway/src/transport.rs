//! Transport abstraction between the gateway and the network.

use std::fmt;

use thiserror::Error;
use url::Url;

/// HTTP method used by backend endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read request.
    Get,
    /// Mutating request with JSON body.
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// One fully-resolved backend request.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    /// Request method.
    pub method: Method,
    /// Absolute URL including query string.
    pub url: Url,
    /// JSON body for `POST` requests.
    pub body: Option<serde_json::Value>,
}

// Bodies may carry passwords, so only their presence is shown.
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url.path())
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Raw backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Undecoded response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a response from a status and a JSON value.
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    /// Returns `true` for `2xx` statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by [`crate::Gateway`].
pub trait BackendTransport: Send + Sync {
    /// Sends one request and returns whatever response arrived.
    ///
    /// Non-success statuses are responses, not errors.
    ///
    /// # Errors
    /// Returns [`TransportError`] only when no response was received.
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Failure to obtain any response from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Request exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),
    /// Connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),
    /// Any other transport-level failure.
    #[error("transport failure: {0}")]
    Other(String),
}
