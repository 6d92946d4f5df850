//! Shared fixtures for app integration tests.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use moodtrack_app::{GatewayWorker, LoopEvent, Shell};
use moodtrack_gateway::{ApiRequest, ApiResponse, BackendTransport, Gateway, TransportError};

/// Transport answering by request path, so concurrent workers get the right body.
#[derive(Debug, Default)]
pub struct RoutedTransport {
    routes: HashMap<String, ApiResponse>,
    requests: Mutex<Vec<ApiRequest>>,
}

#[allow(dead_code)]
impl RoutedTransport {
    /// Creates a shared transport with no routes; every path fails to connect.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answers requests for `path` with `status` and JSON `body`.
    pub fn route(mut self, path: &str, status: u16, body: serde_json::Value) -> Self {
        self.routes
            .insert(path.to_string(), ApiResponse::json(status, &body));
        self
    }

    /// Finishes building and shares the transport.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Paths requested so far, in arrival order.
    pub fn requested_paths(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("request log lock")
            .iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }
}

impl BackendTransport for RoutedTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .expect("request log lock")
            .push(request.clone());
        self.routes
            .get(request.url.path())
            .cloned()
            .ok_or_else(|| TransportError::Connect("connection refused".to_string()))
    }
}

/// Builds a shell writing into memory plus the receiver its worker posts to.
#[allow(dead_code)]
pub fn shell(transport: Arc<RoutedTransport>) -> (Shell<Vec<u8>>, Receiver<LoopEvent>) {
    let gateway =
        Gateway::new("http://localhost:5000", transport).expect("gateway should build");
    let (events_tx, events_rx) = mpsc::channel();
    (Shell::new(GatewayWorker::new(gateway, events_tx), Vec::new()), events_rx)
}

/// Feeds `lines` to the shell as typed input.
#[allow(dead_code)]
pub fn type_lines(shell: &mut Shell<Vec<u8>>, lines: &[&str]) {
    for line in lines {
        shell
            .on_event(LoopEvent::Line((*line).to_string()))
            .expect("line should be handled");
    }
}

/// Applies the next `count` completions posted by workers.
#[allow(dead_code)]
pub fn drain_completions(shell: &mut Shell<Vec<u8>>, events: &Receiver<LoopEvent>, count: usize) {
    for _ in 0..count {
        let event = events
            .recv_timeout(Duration::from_secs(5))
            .expect("worker should post a completion");
        shell.on_event(event).expect("completion should apply");
    }
}

/// Terminal output written so far.
#[allow(dead_code)]
pub fn screen(shell: &Shell<Vec<u8>>) -> String {
    String::from_utf8_lossy(shell.output()).into_owned()
}
