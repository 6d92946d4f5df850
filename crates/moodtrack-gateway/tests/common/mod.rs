//! Shared fixtures for gateway integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use moodtrack_gateway::{ApiRequest, ApiResponse, BackendTransport, Gateway, TransportError};

/// Transport that replays queued outcomes and records every request.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<ApiResponse, TransportError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    /// Creates a transport that answers with `outcomes` in order.
    pub fn new(outcomes: Vec<Result<ApiResponse, TransportError>>) -> Arc<Self> {
        Arc::new(Self {
            outcomes: Mutex::new(outcomes.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Creates a transport that answers once with `status` and JSON `body`.
    pub fn replying(status: u16, body: serde_json::Value) -> Arc<Self> {
        Self::new(vec![Ok(ApiResponse::json(status, &body))])
    }

    /// Returns every request sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("request log lock").clone()
    }
}

impl BackendTransport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .expect("request log lock")
            .push(request.clone());
        self.outcomes
            .lock()
            .expect("outcome lock")
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no scripted outcome".to_string())))
    }
}

/// Builds a gateway against the local development backend.
#[allow(dead_code)]
pub fn gateway(transport: Arc<ScriptedTransport>) -> Gateway {
    Gateway::new("http://localhost:5000", transport).expect("gateway should build")
}
