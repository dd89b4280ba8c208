//! phpIPAM API client
//!
//! HTTP implementation of [`PhpIpamTransport`] over reqwest.
//! Requests go to `{endpoint}/{app_id}/{controller}/...` and carry the
//! session token in the `token` header.

use crate::common::{ApiResponse, HttpClient};
use crate::config::Config;
use crate::error::PhpIpamError;
use crate::session::Session;
use crate::transport::PhpIpamTransport;
use reqwest::{Client, Method};
use serde_json::Value;
use std::sync::Arc;

/// phpIPAM API client
#[derive(Debug, Clone)]
pub struct PhpIpamClient {
    http: HttpClient,
    session: Session,
}

impl PhpIpamClient {
    /// Create a client for an existing session
    ///
    /// # Arguments
    /// * `session` - Session holding the configuration and (optionally) a token
    pub fn new(session: Session) -> Result<Self, PhpIpamError> {
        let client = build_http_client(session.config())?;
        Ok(Self::with_client(client, session))
    }

    /// Create a client from a preconfigured reqwest client
    pub fn with_client(client: Client, session: Session) -> Self {
        let http = HttpClient::new(client, session.config().base_url());
        Self { http, session }
    }

    /// Log in with the configured credentials and return an authenticated client
    ///
    /// # Returns
    /// * `Ok(PhpIpamClient)` - Client holding a fresh session token
    /// * `Err(PhpIpamError::Authentication)` - Credentials were rejected
    pub async fn connect(config: Config) -> Result<Self, PhpIpamError> {
        let client = build_http_client(&config)?;
        Self::connect_with_client(client, config).await
    }

    /// Log in using a preconfigured reqwest client
    pub async fn connect_with_client(client: Client, config: Config) -> Result<Self, PhpIpamError> {
        if config.username.is_empty() {
            return Err(PhpIpamError::InvalidConfig(
                "a user name is required to log in".to_string(),
            ));
        }
        let http = HttpClient::new(client, config.base_url());
        let login = http.login(&config.username, &config.password).await?;
        let session = Session::from_login(config, login);
        Ok(Self { http, session })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// The session this client authenticates with
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Share this client as a transport for controllers
    pub fn into_transport(self) -> Arc<dyn PhpIpamTransport> {
        Arc::new(self)
    }
}

fn build_http_client(config: &Config) -> Result<Client, PhpIpamError> {
    Client::builder()
        .timeout(config.timeout)
        .danger_accept_invalid_certs(config.insecure)
        .build()
        .map_err(PhpIpamError::Http)
}

#[async_trait::async_trait]
impl PhpIpamTransport for PhpIpamClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn send_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse, PhpIpamError> {
        self.http.send(method, path, self.session.token(), body).await
    }
}
