//! Scripted transport for unit tests.

use crate::transport::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

enum Reply {
    Respond(ApiResponse),
    Unreachable,
}

/// Answers by `(method, url)` and records every request it sees.
/// Unscripted routes answer 404 with an empty body.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, url: &str, status: u16, body: Value) {
        self.routes.lock().unwrap().insert(
            (method, url.to_string()),
            Reply::Respond(ApiResponse::json(status, &body)),
        );
    }

    pub fn respond_raw(&self, method: Method, url: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            (method, url.to_string()),
            Reply::Respond(ApiResponse::new(status, body)),
        );
    }

    pub fn unreachable(&self, method: Method, url: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, url.to_string()), Reply::Unreachable);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `METHOD url` lines, in order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url))
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let key = (request.method, request.url.clone());
        self.requests.lock().unwrap().push(request);

        match self.routes.lock().unwrap().get(&key) {
            Some(Reply::Respond(response)) => Ok(response.clone()),
            Some(Reply::Unreachable) => {
                Err(TransportError::Connection("connection refused".to_string()))
            }
            None => Ok(ApiResponse::new(404, "")),
        }
    }
}
