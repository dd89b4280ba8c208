//! Transport trait for mocking
//!
//! Every controller talks to phpIPAM through this trait. The concrete
//! [`PhpIpamClient`](crate::PhpIpamClient) implements it over HTTP, and tests
//! substitute `MockTransport`.

use crate::common::ApiResponse;
use crate::error::PhpIpamError;
use reqwest::Method;
use serde_json::Value;

/// Request dispatcher for phpIPAM API calls
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait PhpIpamTransport: Send + Sync {
    /// Get the base URL (`{endpoint}/{app_id}`)
    fn base_url(&self) -> &str;

    /// Send one request to `path` (relative to the base URL) and return the
    /// decoded response envelope.
    ///
    /// Non-2xx statuses and `success: false` envelopes are errors.
    async fn send_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, PhpIpamError>;
}
