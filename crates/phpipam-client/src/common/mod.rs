//! Common utilities for phpIPAM API client
//!
//! Provides the response envelope and the authenticated HTTP wrapper shared
//! by every controller.

pub mod query;

use crate::error::PhpIpamError;
use crate::scalar::nullable_string;
use crate::session::LoginResponse;
use reqwest::{Client, Method, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Response envelope returned by every phpIPAM endpoint
///
/// ```json
/// {"code": 200, "success": true, "message": "...", "data": ...}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP-like status code echoed by phpIPAM
    #[serde(default)]
    pub code: u16,
    /// Whether phpIPAM considers the call successful
    #[serde(default)]
    pub success: bool,
    /// Human-readable status message
    #[serde(default, deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Payload, absent for most mutating calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiResponse {
    /// Successful response carrying `data`
    pub fn ok(data: Value) -> Self {
        Self {
            code: 200,
            success: true,
            message: String::new(),
            data: Some(data),
        }
    }

    /// Successful response carrying only a message
    pub fn with_message(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Confirmation text of a mutating call.
    ///
    /// Some endpoints put the interesting value in `data` (e.g. the address
    /// picked by `first_free`), others only fill `message`.
    pub fn into_message(self) -> String {
        match self.data {
            Some(Value::String(text)) => text,
            _ => self.message,
        }
    }
}

/// HTTP client wrapper bound to one API application
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send one request and unwrap the response envelope
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<ApiResponse, PhpIpamError> {
        let url = self.build_url(path);
        match body {
            Some(body) => debug!("{} {} with body: {}", method, url, body),
            None => debug!("{} {}", method, url),
        }

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Accept", "application/json");
        if let Some(token) = token {
            request = request.header("token", token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(PhpIpamError::Http)?;
        read_envelope(&method, path, response).await
    }

    /// Log in with HTTP basic auth and return the issued token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, PhpIpamError> {
        let url = self.build_url("/user/");
        debug!("POST {} (login as {})", url, username);

        let response = self
            .client
            .post(&url)
            .basic_auth(username, Some(password))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(PhpIpamError::Http)?;

        let envelope = read_envelope(&Method::POST, "/user/", response)
            .await
            .map_err(|e| match e {
                PhpIpamError::Api(msg) | PhpIpamError::NotFound(msg) => PhpIpamError::Authentication(msg),
                other => other,
            })?;

        let data = envelope
            .data
            .ok_or_else(|| PhpIpamError::Authentication("login response carried no token".to_string()))?;
        let login: LoginResponse = serde_json::from_value(data)?;
        info!("Logged in to phpIPAM at {} as {}", self.base_url, username);
        Ok(login)
    }
}

/// Map the HTTP status and envelope of a response onto a result
async fn read_envelope(method: &Method, path: &str, response: Response) -> Result<ApiResponse, PhpIpamError> {
    let status = response.status();
    let body = response.text().await.map_err(PhpIpamError::Http)?;

    if !status.is_success() {
        let detail = serde_json::from_str::<ApiResponse>(&body)
            .ok()
            .map(|envelope| envelope.message)
            .filter(|message| !message.is_empty())
            .unwrap_or(body);
        let message = format!("{} {} failed: {} - {}", method, path, status, detail);
        return Err(match status.as_u16() {
            401 | 403 => PhpIpamError::Authentication(message),
            404 => PhpIpamError::NotFound(message),
            _ => PhpIpamError::Api(message),
        });
    }

    if body.trim().is_empty() {
        return Ok(ApiResponse::with_message(status.as_u16(), ""));
    }

    let envelope: ApiResponse = serde_json::from_str(&body).map_err(|e| {
        PhpIpamError::Api(format!(
            "error decoding response body: {} - Response (first 500 chars): {}",
            e,
            body.chars().take(500).collect::<String>()
        ))
    })?;

    if !envelope.success {
        return Err(PhpIpamError::Api(format!(
            "{} {} failed: {} - {}",
            method, path, envelope.code, envelope.message
        )));
    }

    Ok(envelope)
}
