//! Reqwest-backed transport.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::transport::{ApiRequest, ApiResponse, BackendTransport, Method, TransportError};

/// Blocking HTTP transport with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns [`TransportError::Other`] when the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("moodtrack/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|error| TransportError::Other(format!("http client setup: {error}")))?;
        Ok(Self { client })
    }
}

impl BackendTransport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let builder = match request.method {
            Method::Get => self.client.get(request.url.clone()),
            Method::Post => self.client.post(request.url.clone()),
        }
        .header(ACCEPT, "application/json");

        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder.send().map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(map_transport_error)?;

        Ok(ApiResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else {
        TransportError::Other(error.to_string())
    }
}
