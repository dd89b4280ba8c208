//! phpIPAM client errors

use thiserror::Error;

use crate::scalar::ScalarError;

/// Errors that can occur when interacting with the phpIPAM API
#[derive(Debug, Error)]
pub enum PhpIpamError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// phpIPAM API returned an error
    #[error("phpIPAM API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (bad credentials, expired token, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A normalized integer or boolean field held a token that cannot be parsed
    #[error("{0}")]
    MalformedScalar(String),

    /// A custom field update named a field the controller's schema does not define
    #[error("Custom field {field} not found in schema for controller {controller}")]
    UnknownCustomField {
        /// Offending field name
        field: String,
        /// Controller whose schema was consulted
        controller: String,
    },

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ScalarError> for PhpIpamError {
    fn from(err: ScalarError) -> Self {
        PhpIpamError::MalformedScalar(err.to_string())
    }
}

impl PhpIpamError {
    /// Classify a decode failure of response data.
    ///
    /// Scalar visitors report through `serde::de::Error::custom`, so the only
    /// trace of a [`ScalarError`] left in a `serde_json::Error` is its message.
    pub(crate) fn from_decode(err: serde_json::Error) -> Self {
        if err.is_data() && err.to_string().starts_with(ScalarError::PREFIX) {
            PhpIpamError::MalformedScalar(err.to_string())
        } else {
            PhpIpamError::Serialization(err)
        }
    }
}
