//! Authentication session
//!
//! A session pairs a [`Config`] with the API token issued by phpIPAM.
//! It is created once (by logging in, or from a pre-issued token) and then
//! shared read-only by every request.

use crate::config::Config;
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::warn;

/// Timestamp format of the `expires` field returned by `POST /user/`
const EXPIRES_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Token payload returned by a successful login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Session token to send with subsequent requests
    pub token: String,
    /// Token expiry, in the server's local time
    #[serde(default)]
    pub expires: Option<String>,
}

/// Authenticated (or not yet authenticated) phpIPAM session
#[derive(Debug, Clone)]
pub struct Session {
    config: Config,
    token: Option<String>,
    expires: Option<NaiveDateTime>,
}

impl Session {
    /// Create a session without a token
    pub fn new(config: Config) -> Self {
        Self {
            config,
            token: None,
            expires: None,
        }
    }

    /// Create a session from a pre-issued token (e.g. an app code token)
    pub fn with_token(config: Config, token: impl Into<String>) -> Self {
        Self {
            config,
            token: Some(token.into()),
            expires: None,
        }
    }

    /// Build a session from a login response
    pub(crate) fn from_login(config: Config, login: LoginResponse) -> Self {
        let expires = login.expires.as_deref().and_then(|raw| {
            NaiveDateTime::parse_from_str(raw, EXPIRES_FORMAT)
                .map_err(|e| warn!("Ignoring unparseable token expiry {:?}: {}", raw, e))
                .ok()
        });
        Self {
            config,
            token: Some(login.token),
            expires,
        }
    }

    /// Session configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// API token, if authenticated
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Token expiry, if the server reported one
    pub fn expires(&self) -> Option<NaiveDateTime> {
        self.expires
    }

    /// Whether the token has expired at `now` (server local time).
    ///
    /// Sessions without a reported expiry never expire.
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires.is_some_and(|expires| now >= expires)
    }
}
