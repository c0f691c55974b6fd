//! Transport port.
//!
//! A [`Transport`] puts a fully intercepted [`ApiRequest`] on the wire and
//! reports what came back. It does not interpret status codes: any response
//! is `Ok`, and `Err` is reserved for requests that produced no response.
//!
//! The reqwest implementation lives in the `transport` crate.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::TransportError;
use crate::progress::ProgressTracker;
use crate::request::ApiRequest;

/// What a server answered.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code; `0` if the transport could not determine it.
    pub status: u16,
    /// Parsed JSON body; `None` when the body was empty or not JSON.
    pub body: Option<Value>,
}

impl TransportResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the API server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes `request` exactly as given.
    async fn execute(&self, request: &ApiRequest) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: &ApiRequest) -> Result<TransportResponse, TransportError> {
        (**self).execute(request).await
    }
}

// ---------------------------------------------------------------------------
// Progress-tracking wrapper
// ---------------------------------------------------------------------------

/// Wraps a transport so every call, whoever makes it, counts as a pending
/// request on `tracker`.
///
/// Use this for code that talks to the transport directly rather than through
/// the envelope client; wrapping the envelope client's own transport as well
/// is harmless but counts those requests twice.
#[derive(Debug)]
pub struct TrackedTransport<T> {
    inner: T,
    tracker: Arc<ProgressTracker>,
}

impl<T> TrackedTransport<T> {
    pub fn new(inner: T, tracker: Arc<ProgressTracker>) -> Self {
        Self { inner, tracker }
    }

    /// Returns the wrapped transport.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for TrackedTransport<T> {
    async fn execute(&self, request: &ApiRequest) -> Result<TransportResponse, TransportError> {
        let _in_flight = self.tracker.track();
        self.inner.execute(request).await
    }
}
