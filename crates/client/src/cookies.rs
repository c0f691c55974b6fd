//! Cookie storage port.
//!
//! The CSRF interceptor reads the token through [`CookieStore`] on every
//! request, never caching it, because the server rotates the token (for
//! example on login). The reqwest cookie jar adapter lives in the `transport`
//! crate; [`MemoryCookieStore`] serves tests and callers that manage cookies
//! themselves.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::identifiers::CookieName;

/// Read access to the cookies the server has set.
pub trait CookieStore: Send + Sync {
    /// Current value of the cookie called `name`, if set.
    fn get(&self, name: &CookieName) -> Option<String>;
}

/// A cookie store held in memory.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: RwLock<HashMap<String, String>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or replaces a cookie.
    pub fn set(&self, name: &CookieName, value: impl Into<String>) {
        self.cookies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.as_str().to_string(), value.into());
    }

    /// Removes a cookie.
    pub fn remove(&self, name: &CookieName) {
        self.cookies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name.as_str());
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &CookieName) -> Option<String> {
        self.cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name.as_str())
            .cloned()
    }
}

/// Extracts the value of `name` from a `Cookie` request header
/// (`a=1; csrftoken=abc`).
pub fn find_cookie(header: &str, name: &CookieName) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name.as_str()).then(|| value.trim().trim_matches('"').to_string())
    })
}
