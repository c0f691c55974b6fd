//! The envelope client: an interceptor pipeline over an owned [`Transport`].
//!
//! Every call resolves to an [`Envelope`]; callers branch on
//! [`Envelope::success`] instead of handling errors:
//!
//! 1. registered interceptors run in order on the outgoing [`ApiRequest`];
//! 2. the transport executes it;
//! 3. the outcome is normalized (see [`crate::envelope`]);
//! 4. interceptors are settled in reverse order.
//!
//! [`EnvelopeClient::standard`] registers the pipeline the web application
//! uses: CSRF header, progress tracking, snake_case request keys.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::cookies::CookieStore;
use crate::envelope::Envelope;
use crate::interceptors::{
    CsrfTokenInterceptor, Interceptor, ProgressInterceptor, SnakeCaseKeysInterceptor,
};
use crate::progress::ProgressTracker;
use crate::request::{ApiRequest, Method, MultipartForm};
use crate::transport::Transport;

/// Path of the current-user profile endpoint.
pub const PROFILE_PATH: &str = "/users/profile";
/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/users/login";

/// HTTP client that always answers with an [`Envelope`].
pub struct EnvelopeClient<T> {
    transport: T,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

/// Registers interceptors before an [`EnvelopeClient`] is built.
pub struct EnvelopeClientBuilder<T> {
    transport: T,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl<T: Transport> EnvelopeClientBuilder<T> {
    /// Appends an interceptor; it runs after those registered before it.
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn build(self) -> EnvelopeClient<T> {
        EnvelopeClient {
            transport: self.transport,
            interceptors: self.interceptors,
        }
    }
}

impl<T: Transport> EnvelopeClient<T> {
    /// Starts a client over `transport` with no interceptors.
    pub fn builder(transport: T) -> EnvelopeClientBuilder<T> {
        EnvelopeClientBuilder {
            transport,
            interceptors: Vec::new(),
        }
    }

    /// Builds a client with the standard interceptor pipeline.
    pub fn standard(
        transport: T,
        config: &ClientConfig,
        cookies: Arc<dyn CookieStore>,
        tracker: Arc<ProgressTracker>,
    ) -> Self {
        Self::builder(transport)
            .interceptor(CsrfTokenInterceptor::new(cookies, config))
            .interceptor(ProgressInterceptor::new(tracker))
            .interceptor(SnakeCaseKeysInterceptor)
            .build()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Names of the registered interceptors, in execution order.
    pub fn interceptor_names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Sends `request` through the interceptor pipeline.
    #[instrument(
        skip_all,
        fields(request_id = %request.id, method = %request.method, path = %request.path)
    )]
    pub async fn send(&self, mut request: ApiRequest) -> Envelope {
        for interceptor in &self.interceptors {
            interceptor.on_request(&mut request);
        }
        let _settle = Settle {
            interceptors: &self.interceptors,
            request: &request,
        };

        let envelope = match self.transport.execute(&request).await {
            Ok(response) if response.is_success() => Envelope::from_success(response.body),
            Ok(response) => {
                debug!(
                    status = response.status,
                    "Server answered with a failure status"
                );
                Envelope::from_failure(response.status, response.body)
            }
            Err(error) => {
                warn!(%error, "Request produced no response");
                Envelope::network_error()
            }
        };

        debug!(
            success = envelope.success,
            error_code = envelope.error_code,
            "Request settled"
        );
        envelope
    }

    pub async fn get(&self, path: &str) -> Envelope {
        self.send(ApiRequest::get(path)).await
    }

    /// `GET` with query parameters (keys may be camelCase).
    pub async fn get_with_query(&self, path: &str, query: Map<String, Value>) -> Envelope {
        self.send(ApiRequest::get(path).with_query(query)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Envelope {
        self.send(ApiRequest::post(path, body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Envelope {
        self.send(ApiRequest::new(Method::Put, path).with_json(body)).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> Envelope {
        self.send(ApiRequest::new(Method::Patch, path).with_json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Envelope {
        self.send(ApiRequest::new(Method::Delete, path)).await
    }

    /// `POST` a multipart form; field names are sent as given.
    pub async fn upload(&self, path: &str, form: MultipartForm) -> Envelope {
        self.send(ApiRequest::new(Method::Post, path).with_multipart(form)).await
    }

    /// Fetches the current user's profile (`GET /users/profile`).
    pub async fn user_profile(&self) -> Envelope {
        self.get(PROFILE_PATH).await
    }

    /// Logs in with caller-provided credentials (`POST /users/login`).
    ///
    /// The server accepts `username` or `email` together with `password`.
    pub async fn login(&self, credentials: Value) -> Envelope {
        self.post(LOGIN_PATH, credentials).await
    }
}

impl<T> std::fmt::Debug for EnvelopeClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.interceptors.iter().map(|i| i.name()).collect();
        f.debug_struct("EnvelopeClient")
            .field("interceptors", &names)
            .finish_non_exhaustive()
    }
}

/// Settles interceptors when dropped, so a cancelled send still settles.
struct Settle<'a> {
    interceptors: &'a [Arc<dyn Interceptor>],
    request: &'a ApiRequest,
}

impl Drop for Settle<'_> {
    fn drop(&mut self) {
        for interceptor in self.interceptors.iter().rev() {
            interceptor.on_settled(self.request);
        }
    }
}
