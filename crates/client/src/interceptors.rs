//! Request interceptors registered on an [`crate::EnvelopeClient`].
//!
//! Interceptors run in registration order on the way out and are settled in
//! reverse order once the request has an outcome. The client guarantees that
//! every interceptor whose [`Interceptor::on_request`] ran sees exactly one
//! [`Interceptor::on_settled`], including when the send future is dropped
//! before the transport answers.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::cookies::CookieStore;
use crate::identifiers::{CookieName, HeaderKey};
use crate::keys::{snake_case, KeyCase};
use crate::progress::ProgressTracker;
use crate::request::{ApiRequest, RequestBody};

/// A step of the outgoing request pipeline.
pub trait Interceptor: Send + Sync {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Mutates the request before it is sent.
    fn on_request(&self, request: &mut ApiRequest);

    /// Observes that the request settled, whatever the outcome.
    fn on_settled(&self, _request: &ApiRequest) {}
}

// ---------------------------------------------------------------------------
// CSRF
// ---------------------------------------------------------------------------

/// Copies the CSRF cookie into the CSRF header.
///
/// The cookie is read on every request; an absent cookie sends an empty header.
pub struct CsrfTokenInterceptor {
    cookies: Arc<dyn CookieStore>,
    cookie: CookieName,
    header: HeaderKey,
}

impl CsrfTokenInterceptor {
    /// Uses the cookie and header names from `config`.
    pub fn new(cookies: Arc<dyn CookieStore>, config: &ClientConfig) -> Self {
        Self {
            cookies,
            cookie: config.csrf_cookie().clone(),
            header: config.csrf_header().clone(),
        }
    }
}

impl Interceptor for CsrfTokenInterceptor {
    fn name(&self) -> &'static str {
        "csrf_token"
    }

    fn on_request(&self, request: &mut ApiRequest) {
        let token = self.cookies.get(&self.cookie).unwrap_or_default();
        request.set_header(self.header.as_str(), token);
    }
}

impl std::fmt::Debug for CsrfTokenInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfTokenInterceptor")
            .field("cookie", &self.cookie)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Key case
// ---------------------------------------------------------------------------

/// Converts JSON body keys and query keys to snake_case.
///
/// Multipart bodies are left alone: form field names can be case-sensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaseKeysInterceptor;

impl Interceptor for SnakeCaseKeysInterceptor {
    fn name(&self) -> &'static str {
        "snake_case_keys"
    }

    fn on_request(&self, request: &mut ApiRequest) {
        if let RequestBody::Json(body) = &mut request.body {
            *body = KeyCase::Snake.convert(body.take());
        }
        request.query = std::mem::take(&mut request.query)
            .into_iter()
            .map(|(key, value)| (snake_case(&key), KeyCase::Snake.convert(value)))
            .collect();
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Counts the request as pending on a [`ProgressTracker`] until it settles.
#[derive(Debug, Clone)]
pub struct ProgressInterceptor {
    tracker: Arc<ProgressTracker>,
}

impl ProgressInterceptor {
    pub fn new(tracker: Arc<ProgressTracker>) -> Self {
        Self { tracker }
    }
}

impl Interceptor for ProgressInterceptor {
    fn name(&self) -> &'static str {
        "progress"
    }

    fn on_request(&self, _request: &mut ApiRequest) {
        self.tracker.begin();
    }

    fn on_settled(&self, _request: &ApiRequest) {
        self.tracker.end();
    }
}
