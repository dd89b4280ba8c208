//! Client configuration
//!
//! Connection settings for a phpIPAM API application, loaded either
//! explicitly or from `PHPIPAM_*` environment variables.

use crate::error::PhpIpamError;
use std::env;
use std::fmt;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "http://localhost/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for one phpIPAM API application
#[derive(Clone)]
pub struct Config {
    /// API application ID, as configured under Administration > API
    pub app_id: String,
    /// API endpoint, e.g. `https://ipam.example.com/api`
    pub endpoint: String,
    /// User name for session login
    pub username: String,
    /// Password for session login
    pub password: String,
    /// Skip TLS certificate verification
    pub insecure: bool,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            username: String::new(),
            password: String::new(),
            insecure: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("insecure", &self.insecure)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Create a configuration for the given endpoint and application
    pub fn new(endpoint: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            app_id: app_id.into(),
            ..Self::default()
        }
    }

    /// Set login credentials
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Load configuration from environment variables
    ///
    /// * `PHPIPAM_APP_ID` (required)
    /// * `PHPIPAM_ENDPOINT_ADDR` (default `http://localhost/api`)
    /// * `PHPIPAM_USER_NAME`, `PHPIPAM_PASSWORD`
    /// * `PHPIPAM_INSECURE` (`1`/`true`/`0`/`false`)
    /// * `PHPIPAM_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, PhpIpamError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, PhpIpamError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_id = lookup("PHPIPAM_APP_ID")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                PhpIpamError::InvalidConfig("PHPIPAM_APP_ID environment variable is required".to_string())
            })?;

        let mut config = Self {
            app_id,
            ..Self::default()
        };

        if let Some(endpoint) = lookup("PHPIPAM_ENDPOINT_ADDR").filter(|v| !v.is_empty()) {
            config.endpoint = endpoint;
        }
        config.username = lookup("PHPIPAM_USER_NAME").unwrap_or_default();
        config.password = lookup("PHPIPAM_PASSWORD").unwrap_or_default();

        if let Some(insecure) = lookup("PHPIPAM_INSECURE") {
            config.insecure = match insecure.to_ascii_lowercase().as_str() {
                "1" | "true" => true,
                "" | "0" | "false" => false,
                other => {
                    return Err(PhpIpamError::InvalidConfig(format!(
                        "PHPIPAM_INSECURE must be true or false, got {other}"
                    )));
                }
            };
        }

        if let Some(timeout) = lookup("PHPIPAM_TIMEOUT_SECS") {
            let secs: u64 = timeout.parse().map_err(|_| {
                PhpIpamError::InvalidConfig(format!("PHPIPAM_TIMEOUT_SECS is not a number: {timeout}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Base URL of the API application: `{endpoint}/{app_id}`
    pub fn base_url(&self) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), self.app_id)
    }
}
