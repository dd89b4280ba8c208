//! Query utilities for phpIPAM API
//!
//! Typed request helpers layered on [`PhpIpamTransport`], plus path builders.

use crate::error::PhpIpamError;
use crate::transport::PhpIpamTransport;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode response data into `T`
pub fn decode<T: DeserializeOwned>(data: Value) -> Result<T, PhpIpamError> {
    serde_json::from_value(data).map_err(PhpIpamError::from_decode)
}

/// Encode a request body
pub fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, PhpIpamError> {
    Ok(serde_json::to_value(body)?)
}

/// GET a single record
///
/// A successful response without `data` is reported as [`PhpIpamError::NotFound`].
pub async fn fetch_one<T: DeserializeOwned>(
    transport: &dyn PhpIpamTransport,
    path: &str,
) -> Result<T, PhpIpamError> {
    let response = transport.send_request(Method::GET, path, None).await?;
    match response.data {
        Some(Value::Null) | None => Err(PhpIpamError::NotFound(format!(
            "GET {} returned no data: {}",
            path, response.message
        ))),
        Some(data) => decode(data),
    }
}

/// GET a collection, preserving server order
///
/// phpIPAM omits `data` when a collection is empty; that yields an empty vec.
pub async fn fetch_list<T: DeserializeOwned>(
    transport: &dyn PhpIpamTransport,
    path: &str,
) -> Result<Vec<T>, PhpIpamError> {
    let response = transport.send_request(Method::GET, path, None).await?;
    match response.data {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(data) => decode(data),
    }
}

/// Send a request and return its confirmation message
pub async fn send_for_message(
    transport: &dyn PhpIpamTransport,
    method: Method,
    path: &str,
    body: Option<&Value>,
) -> Result<String, PhpIpamError> {
    let response = transport.send_request(method, path, body).await?;
    Ok(response.into_message())
}

/// Send a request whose response payload is not used
pub async fn send_for_unit(
    transport: &dyn PhpIpamTransport,
    method: Method,
    path: &str,
    body: Option<&Value>,
) -> Result<(), PhpIpamError> {
    transport.send_request(method, path, body).await?;
    Ok(())
}

/// Build a filtered collection path:
/// `/{controller}/?filter_by={field}&filter_value={value}`
pub fn filter_path(base: &str, filter_by: &str, filter_value: &str) -> String {
    format!(
        "{}?filter_by={}&filter_value={}",
        base,
        urlencoding::encode(filter_by),
        urlencoding::encode(filter_value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ApiResponse;
    use crate::mock::MockTransport;
    use serde_json::json;

    #[test]
    fn test_filter_path_encodes_value() {
        assert_eq!(
            filter_path("/l2domains/", "name", "core dc"),
            "/l2domains/?filter_by=name&filter_value=core%20dc"
        );
    }

    #[tokio::test]
    async fn test_fetch_list_without_data_is_empty() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond(Method::GET, "/things/", ApiResponse::with_message(200, "No things found"));

        let things: Vec<Value> = fetch_list(&mock, "/things/").await.unwrap();
        assert!(things.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_list_empty_array() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond_data(Method::GET, "/things/", json!([]));

        let things: Vec<Value> = fetch_list(&mock, "/things/").await.unwrap();
        assert!(things.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_one_without_data_is_not_found() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond(Method::GET, "/things/1/", ApiResponse::with_message(200, "gone"));

        let result: Result<Value, _> = fetch_one(&mock, "/things/1/").await;
        assert!(matches!(result, Err(PhpIpamError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_send_for_message_prefers_string_data() {
        let mock = MockTransport::new("http://ipam/api/app");
        mock.respond(
            Method::POST,
            "/addresses/first_free/3/",
            ApiResponse {
                code: 201,
                success: true,
                message: "Address created".to_string(),
                data: Some(json!("10.0.0.5")),
            },
        );
        mock.respond(Method::POST, "/sections/", ApiResponse::with_message(201, "Section created"));

        let first_free = send_for_message(&mock, Method::POST, "/addresses/first_free/3/", None)
            .await
            .unwrap();
        assert_eq!(first_free, "10.0.0.5");

        let created = send_for_message(&mock, Method::POST, "/sections/", None).await.unwrap();
        assert_eq!(created, "Section created");
    }
}
