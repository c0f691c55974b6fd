//! Client configuration.
//!
//! [`ClientConfig`] is validated when it is built; a client is never
//! constructed from an invalid configuration. The CLI fills it from arguments
//! and environment variables.

use std::time::Duration;

use crate::errors::ClientError;
use crate::identifiers::{CookieName, HeaderKey};

/// API root used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
/// Cookie the server stores the CSRF token in.
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";
/// Header the server expects the CSRF token in.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Where the API lives and how requests authenticate against CSRF checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    base_url: String,
    csrf_cookie: CookieName,
    csrf_header: HeaderKey,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration for the API rooted at `base_url`
    /// (e.g. `https://gitsap.example/api`).
    ///
    /// Trailing slashes are dropped. No request timeout is set.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/');
        let host = base_url
            .strip_prefix("https://")
            .or_else(|| base_url.strip_prefix("http://"))
            .ok_or_else(|| ClientError::Configuration {
                message: format!("base URL must use http:// or https://, got '{base_url}'"),
            })?;
        if host.is_empty() || host.starts_with('/') {
            return Err(ClientError::Configuration {
                message: format!("base URL has no host: '{base_url}'"),
            });
        }

        Ok(Self {
            base_url: base_url.to_string(),
            csrf_cookie: CookieName::from_static(DEFAULT_CSRF_COOKIE),
            csrf_header: HeaderKey::from_static(DEFAULT_CSRF_HEADER),
            timeout: None,
        })
    }

    /// Reads the CSRF token from the cookie called `name`.
    pub fn with_csrf_cookie(mut self, name: &str) -> Result<Self, ClientError> {
        self.csrf_cookie = CookieName::new(name).ok_or_else(|| ClientError::Configuration {
            message: format!("invalid CSRF cookie name '{name}'"),
        })?;
        Ok(self)
    }

    /// Sends the CSRF token in the header called `name`.
    pub fn with_csrf_header(mut self, name: &str) -> Result<Self, ClientError> {
        self.csrf_header = HeaderKey::new(name).ok_or_else(|| ClientError::Configuration {
            message: format!("invalid CSRF header name '{name}'"),
        })?;
        Ok(self)
    }

    /// Fails requests that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ClientError> {
        if timeout.is_zero() {
            return Err(ClientError::Configuration {
                message: "timeout must be greater than zero".to_string(),
            });
        }
        self.timeout = Some(timeout);
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn csrf_cookie(&self) -> &CookieName {
        &self.csrf_cookie
    }

    pub fn csrf_header(&self) -> &HeaderKey {
        &self.csrf_header
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Absolute URL of an API path (`/users/profile` → `<base>/users/profile`).
    pub fn url_for(&self, path: &str) -> String {
        if path.is_empty() {
            self.base_url.clone()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            csrf_cookie: CookieName::from_static(DEFAULT_CSRF_COOKIE),
            csrf_header: HeaderKey::from_static(DEFAULT_CSRF_HEADER),
            timeout: None,
        }
    }
}
