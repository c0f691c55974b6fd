//! Client-side domain for the Gitsap web API.
//!
//! This crate contains the envelope response model, key-case conversion,
//! pending-request tracking, and the interceptor pipeline of the envelope
//! client. Transports and cookie stores are ports: the `transport` crate
//! implements them over reqwest.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* a request goes through; infrastructure crates define *how*
//! it reaches the server.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`keys`] | Recursive key conversion and camelCase / snake_case transforms |
//! | [`envelope`] | The `{success, message, error_code, data, meta}` wrapper and its normalization |
//! | [`progress`] | `ProgressTracker` and the `ProgressIndicator` port |
//! | [`request`] | Outgoing request model (`ApiRequest`, bodies, multipart forms) |
//! | [`transport`] | `Transport` port and the progress-tracking wrapper |
//! | [`cookies`] | `CookieStore` port and an in-memory store |
//! | [`interceptors`] | CSRF, snake_case, and progress interceptors |
//! | [`client`] | `EnvelopeClient` and the named API operations |
//! | [`config`] | Validated `ClientConfig` |
//! | [`props`] | Page-props parsing |
//! | [`identifiers`] | Newtype names and request ids |
//! | [`errors`] | Transport and configuration errors |

pub mod client;
pub mod config;
pub mod cookies;
pub mod envelope;
pub mod errors;
pub mod identifiers;
pub mod interceptors;
pub mod keys;
pub mod progress;
pub mod props;
pub mod request;
pub mod transport;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use client::{EnvelopeClient, EnvelopeClientBuilder, LOGIN_PATH, PROFILE_PATH};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_CSRF_COOKIE, DEFAULT_CSRF_HEADER};
pub use cookies::{find_cookie, CookieStore, MemoryCookieStore};
pub use envelope::Envelope;
pub use errors::{ClientError, TransportError};
pub use identifiers::{CookieName, HeaderKey, RequestId};
pub use interceptors::{
    CsrfTokenInterceptor, Interceptor, ProgressInterceptor, SnakeCaseKeysInterceptor,
};
pub use keys::{camel_case, convert_keys, snake_case, KeyCase};
pub use progress::{
    InFlight, LoggingIndicator, NoopIndicator, PageEvent, ProgressIndicator, ProgressTracker,
};
pub use props::parse_props;
pub use request::{ApiRequest, FormPart, Method, MultipartForm, PartValue, RequestBody};
pub use transport::{TrackedTransport, Transport, TransportResponse};
