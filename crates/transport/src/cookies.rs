//! [`client::CookieStore`] over the reqwest cookie jar.

use std::sync::Arc;

use client::{find_cookie, ClientConfig, ClientError, CookieName, CookieStore};
use reqwest::cookie::{CookieStore as _, Jar};
use reqwest::Url;

/// Reads cookies the API server set on the shared reqwest jar.
#[derive(Debug)]
pub struct JarCookieStore {
    jar: Arc<Jar>,
    url: Url,
}

impl JarCookieStore {
    /// Reads cookies that apply to the configured API base URL.
    pub fn new(jar: Arc<Jar>, config: &ClientConfig) -> Result<Self, ClientError> {
        let url = Url::parse(config.base_url()).map_err(|e| ClientError::Configuration {
            message: format!("invalid base URL '{}': {e}", config.base_url()),
        })?;
        Ok(Self { jar, url })
    }

    /// The jar the transport stores response cookies in.
    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Stores a site-wide cookie as if the server had set it.
    pub fn seed(&self, name: &CookieName, value: &str) {
        self.jar.add_cookie_str(&format!("{name}={value}; Path=/"), &self.url);
    }
}

impl CookieStore for JarCookieStore {
    fn get(&self, name: &CookieName) -> Option<String> {
        let header = self.jar.cookies(&self.url)?;
        find_cookie(header.to_str().ok()?, name)
    }
}
