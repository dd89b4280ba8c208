//! Mock transport for unit testing
//!
//! This module provides a mock implementation of [`PhpIpamTransport`] that can
//! be used in unit tests without requiring a running phpIPAM instance.
//! Replies are registered per `(method, path)` and every request is recorded
//! so tests can assert exactly which calls were made.

use crate::common::ApiResponse;
use crate::error::PhpIpamError;
use crate::transport::PhpIpamTransport;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A request observed by [`MockTransport`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL
    pub path: String,
    /// JSON body, if any
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Reply {
    Response(ApiResponse),
    Api(String),
}

/// Mock transport for testing
///
/// Unregistered routes answer [`PhpIpamError::NotFound`], like a 404 would.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    base_url: String,
    replies: Arc<Mutex<HashMap<(Method, String), Reply>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reply to `method path` with a full envelope
    pub fn respond(&self, method: Method, path: impl Into<String>, response: ApiResponse) {
        lock(&self.replies).insert((method, path.into()), Reply::Response(response));
    }

    /// Reply to `method path` with a successful envelope carrying `data`
    pub fn respond_data(&self, method: Method, path: impl Into<String>, data: Value) {
        self.respond(method, path, ApiResponse::ok(data));
    }

    /// Reply to `method path` with a successful envelope carrying `message`
    pub fn respond_message(&self, method: Method, path: impl Into<String>, message: &str) {
        self.respond(method, path, ApiResponse::with_message(200, message));
    }

    /// Make `method path` fail with [`PhpIpamError::Api`]
    pub fn fail(&self, method: Method, path: impl Into<String>, message: impl Into<String>) {
        lock(&self.replies).insert((method, path.into()), Reply::Api(message.into()));
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Requests received so far with the given method
    pub fn requests_with_method(&self, method: &Method) -> Vec<RecordedRequest> {
        lock(&self.requests)
            .iter()
            .filter(|r| &r.method == method)
            .cloned()
            .collect()
    }

    /// Forget recorded requests (replies are kept)
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }
}

#[async_trait::async_trait]
impl PhpIpamTransport for MockTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, PhpIpamError> {
        lock(&self.requests).push(RecordedRequest {
            method: method.clone(),
            path: path.to_string(),
            body: body.cloned(),
        });

        let reply = lock(&self.replies).get(&(method.clone(), path.to_string())).cloned();
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Api(message)) => Err(PhpIpamError::Api(message)),
            None => Err(PhpIpamError::NotFound(format!("{} {} has no mock reply", method, path))),
        }
    }
}
